//! Page Components for Entiform Studio
//!
//! ## Available Pages
//!
//! - **HomePage**: landing page with links to the demos
//! - **ProductsPage**: remote widget with a nested entity field
//! - **PricePlansPage**: remote widget with date columns
//! - **PagesPage**: local widget
//! - **AlbumsPage**: every field kind in one schema
//!

pub mod albums;
pub mod demo_data;
pub mod home;
pub mod pages;
pub mod price_plans;
pub mod products;

pub use albums::AlbumsPage;
pub use home::HomePage;
pub use pages::PagesPage;
pub use price_plans::PricePlansPage;
pub use products::ProductsPage;
