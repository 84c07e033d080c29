mod domain;
mod file_server;
mod netinfo;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting lanserve (sharing the current directory)...");

    let local_ip = match netinfo::resolve_local_private_ipv4() {
        Ok(ip) => ip,
        Err(err) => {
            println!("Error getting local IP address: {}", err);
            std::process::exit(1);
        }
    };

    println!(
        "Server started at http://127.0.0.1 (local) and http://{} (LAN)",
        local_ip
    );

    file_server::run(local_ip).await
}
