use clap::Parser;
use thinkgear_tokio_bridge::constants::{DEFAULT_BAUD_RATE, DEFAULT_SERIAL_PORT, DEFAULT_SESSION_URL};
use thinkgear_tokio_bridge::{BridgeConfig, SessionIdentity};

#[derive(Parser, Debug)]
#[command(
    name = "thinkgear-bridge",
    version,
    about = "Relay ThinkGear headset samples into a classroom session",
    long_about = "Reads the ThinkGear byte stream from a serial or Bluetooth port, decodes \
                  attention, relaxation, signal quality and band powers, and publishes them \
                  to the session server over a WebSocket."
)]
pub struct Cli {
    /// Serial port of the headset (e.g. /dev/rfcomm0 or COM3)
    #[arg(long, default_value = DEFAULT_SERIAL_PORT)]
    pub port: String,

    /// Baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// WebSocket URL of the session server
    #[arg(long, default_value = DEFAULT_SESSION_URL)]
    pub backend: String,

    /// Student identifier attached to every message
    #[arg(long, env = "THINKGEAR_STUDENT_ID", required_unless_present = "list_ports")]
    pub student_id: Option<String>,

    /// Session identifier attached to every message
    #[arg(long, env = "THINKGEAR_SESSION_ID", required_unless_present = "list_ports")]
    pub session_id: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Print available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,
}

impl Cli {
    /// Builds the bridge configuration. Identifiers are checked for presence
    /// only.
    pub fn bridge_config(&self) -> anyhow::Result<BridgeConfig> {
        let student_id = self
            .student_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--student-id is required"))?;
        let session_id = self
            .session_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--session-id is required"))?;

        Ok(
            BridgeConfig::new(SessionIdentity::new(student_id, session_id))
                .with_device(self.port.clone(), self.baud)
                .with_session_url(self.backend.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_headset_profile() {
        let cli = Cli::try_parse_from([
            "thinkgear-bridge",
            "--student-id",
            "s-1",
            "--session-id",
            "x-9",
        ])
        .unwrap();

        let config = cli.bridge_config().unwrap();
        assert_eq!(config.device.port, "COM3");
        assert_eq!(config.device.baud_rate, 57_600);
        assert_eq!(config.session_url, "ws://localhost:3001");
        assert_eq!(config.identity, SessionIdentity::new("s-1", "x-9"));
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "thinkgear-bridge",
            "--port",
            "/dev/rfcomm0",
            "--baud",
            "9600",
            "--backend",
            "ws://10.0.0.5:3001",
            "--student-id",
            "s-1",
            "--session-id",
            "x-9",
        ])
        .unwrap();

        let config = cli.bridge_config().unwrap();
        assert_eq!(config.device.port, "/dev/rfcomm0");
        assert_eq!(config.device.baud_rate, 9600);
        assert_eq!(config.session_url, "ws://10.0.0.5:3001");
    }

    #[test]
    fn list_ports_does_not_need_identifiers() {
        let cli = Cli::try_parse_from(["thinkgear-bridge", "--list-ports"]).unwrap();
        assert!(cli.list_ports);
        assert!(cli.bridge_config().is_err());
    }
}
