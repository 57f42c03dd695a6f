//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = env::var("SITE_PORT").unwrap_or_else(|_| "8000".to_string());

    log::info!("building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            log::error!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            log::warn!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    log::info!("serving static/ at http://127.0.0.1:{port}");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = server {
        log::error!("failed to start http server: {e}");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// The wasm build only uses the library; this keeps the bin target compiling.
#[cfg(target_arch = "wasm32")]
fn main() {}
