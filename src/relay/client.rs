use std::{convert::Infallible, str::FromStr};

/// Who is polling the relay, as told by the `client` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Client {
    /// The ESP32 color sensor, which polls for scan requests.
    Device,
    #[default]
    Frontend,
}

impl Client {
    pub fn as_str(&self) -> &'static str {
        match self {
            Client::Device => "esp32",
            Client::Frontend => "frontend",
        }
    }

    /// Only a single `client=esp32` pair selects the device. A repeated
    /// `client` parameter is ambiguous and falls back to the frontend.
    pub fn from_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut clients = pairs
            .into_iter()
            .filter(|(key, _)| *key == "client")
            .map(|(_, value)| value);

        match (clients.next(), clients.next()) {
            (Some(client), None) => client.parse().unwrap_or_default(),
            _ => Client::Frontend,
        }
    }
}

impl FromStr for Client {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "esp32" => Ok(Client::Device),
            _ => Ok(Client::Frontend),
        }
    }
}
