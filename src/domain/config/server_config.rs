pub struct ServerConfig;

impl ServerConfig {
    pub const HTTP_PORT: u16 = 80;
    pub const BIND_ADDR: &'static str = "0.0.0.0";
    pub const ROOT_DIR: &'static str = ".";
}
