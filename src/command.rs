use anyhow::{Error, bail};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Control actions exposed by the smart-socket controller
///
/// Each command maps 1:1 to a path segment of the device's HTTP interface.
/// The segments are opaque to this crate.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Command {
    #[serde(rename = "socket0Send")]
    Socket0Send,
    #[serde(rename = "socket1Send")]
    Socket1Send,
    #[serde(rename = "socket2Send")]
    Socket2Send,
    #[serde(rename = "socket3Send")]
    Socket3Send,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Socket0Send,
        Command::Socket1Send,
        Command::Socket2Send,
        Command::Socket3Send,
    ];

    /// Path segment on the device, without leading slash
    pub fn path(&self) -> &'static str {
        match self {
            Command::Socket0Send => "socket0Send",
            Command::Socket1Send => "socket1Send",
            Command::Socket2Send => "socket2Send",
            Command::Socket3Send => "socket3Send",
        }
    }

    /// Short name of the button this command is bound to on the remote
    pub fn alias(&self) -> &'static str {
        match self {
            Command::Socket0Send => "power",
            Command::Socket1Send => "brighter",
            Command::Socket2Send => "dimmer",
            Command::Socket3Send => "max",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(command) = Self::ALL
            .into_iter()
            .find(|c| c.path() == s || c.alias().eq_ignore_ascii_case(s))
        {
            return Ok(command);
        }

        bail!("failed to parse command: unknown command '{s}'")
    }
}
