//! Entiform Studio
//!
//! Desktop demo of the Entiform entity editor widgets.

use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .pretty()
        .init();

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   🧩 Entiform Studio v{:<36}║", entiform_ui::VERSION);
    println!("║   Schema-driven entity forms, filters and tables          ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    entiform_ui::launch();
}
