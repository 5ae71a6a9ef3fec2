use rocket::fairing::Info;
use rocket::{Orbit, Rocket};
use tokio::sync::watch;

/// A fairing that publishes the bound port once rocket lifts off, and the
/// handle that reads it back. Needed when binding to port 0.
pub fn create_pair() -> (PortSaver, Port) {
    let (sender, receiver) = watch::channel(None);
    (PortSaver { sender }, Port { receiver })
}

#[derive(Clone)]
pub struct Port {
    receiver: watch::Receiver<Option<u16>>,
}

impl Port {
    /// Waits for liftoff. `None` if the server was dropped before binding.
    pub async fn get(&self) -> Option<u16> {
        let mut receiver = self.receiver.clone();
        loop {
            let port = *receiver.borrow();
            if port.is_some() {
                return port;
            }
            receiver.changed().await.ok()?;
        }
    }
}

pub struct PortSaver {
    sender: watch::Sender<Option<u16>>,
}

#[rocket::async_trait]
impl rocket::fairing::Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: rocket::fairing::Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        tracing::info!(port, "Listening for document creation events");
        self.sender.send_replace(Some(port));
    }
}
