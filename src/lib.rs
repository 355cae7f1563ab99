pub mod cli;
pub mod command;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http_client;
pub mod sender;
pub mod settings;

pub use crate::{
    command::Command,
    endpoint::Endpoint,
    error::SendError,
    http_client::Response,
    sender::{CommandTransport, HttpTransport, RemoteCommandSender, RequestState},
    settings::SettingsStore,
};
