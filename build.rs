//! Build script for Tauri native target.

use std::env;

fn main() {
    // Load .env values (useful during development) before build-time macros read them
    let _ = dotenvy::dotenv();

    if let Ok(val) = env::var("JQR_SERVER_URL") {
        println!("cargo:rustc-env=JQR_SERVER_URL={}", val);
    }

    println!("cargo:rerun-if-env-changed=JQR_SERVER_URL");

    tauri_build::build()
}
