//! UDP front end of the simulator
//!
//! One socket, one loop: receive a datagram, run it through the
//! [`FrameEngine`] to completion, send at most one reply to the sender, repeat.
//! Datagrams arriving meanwhile wait in the kernel receive buffer and are
//! handled strictly in order.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::{debug, error, info};

use crate::config::SimulatorConfig;
use crate::constants::MAX_ADU_SIZE;
use crate::engine::{EngineStats, FrameEngine};
use crate::error::ModbusResult;
use crate::store::RegisterStore;

/// Modbus RTU-over-UDP device simulator
#[derive(Debug)]
pub struct UdpSimulator {
    socket: UdpSocket,
    engine: FrameEngine,
}

impl UdpSimulator {
    /// Bind the socket and set up the engine around `store`
    pub async fn bind(config: SimulatorConfig, store: RegisterStore) -> ModbusResult<Self> {
        let engine = FrameEngine::with_config(store, config.engine)?;
        let socket = UdpSocket::bind(config.bind_address).await?;

        info!(
            "RTU-UDP simulator listening on {} ({} holding, {} input registers, request CRC check {})",
            socket.local_addr()?,
            engine.store().holding_len(),
            engine.store().input_len(),
            if config.engine.validate_request_crc { "on" } else { "off" }
        );

        Ok(Self { socket, engine })
    }

    pub fn local_addr(&self) -> ModbusResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn engine(&self) -> &FrameEngine {
        &self.engine
    }

    pub fn stats(&self) -> EngineStats {
        self.engine.stats()
    }

    /// Serve forever
    pub async fn run(&mut self) -> ModbusResult<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` completes.
    ///
    /// Shutdown is only observed between datagrams; a datagram that has been
    /// received is always processed and answered first.
    pub async fn run_until<F>(&mut self, shutdown: F) -> ModbusResult<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut buf = [0u8; MAX_ADU_SIZE];

        loop {
            let (len, peer) = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping simulator");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        error!("Receive failed: {}", e);
                        continue;
                    }
                },
            };

            self.serve_one(&buf[..len], peer).await;
        }
    }

    async fn serve_one(&mut self, datagram: &[u8], peer: SocketAddr) {
        debug!("RX {} [{}]: {:02X?}", peer, datagram.len(), datagram);

        let Some(response) = self.engine.process(datagram) else {
            return;
        };

        debug!("TX {} [{}]: {:02X?}", peer, response.len(), &response[..]);
        if let Err(e) = self.socket.send_to(&response, peer).await {
            error!("Failed to send response to {}: {}", peer, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::append_crc;
    use crate::error::ModbusError;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_test::{assert_err, assert_ok};

    async fn start(store: RegisterStore) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
        let config = assert_ok!(SimulatorConfig::new("127.0.0.1:0"));
        let mut sim = assert_ok!(UdpSimulator::bind(config, store).await);
        let addr = assert_ok!(sim.local_addr());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            sim.run_until(async {
                let _ = rx.await;
            })
            .await
        });
        (addr, tx)
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let config = SimulatorConfig::new("127.0.0.1:0").unwrap();
        let sim = UdpSimulator::bind(config, RegisterStore::new()).await.unwrap();
        assert_ne!(sim.local_addr().unwrap().port(), 0);
        assert_eq!(sim.stats(), EngineStats::default());
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_engine_config() {
        let mut config = SimulatorConfig::new("127.0.0.1:0").unwrap();
        config.engine = config.engine.with_max_write_registers(1000);
        let err = assert_err!(UdpSimulator::bind(config, RegisterStore::new()).await);
        assert!(matches!(err, ModbusError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_request_reply() {
        let (addr, _shutdown) = start(RegisterStore::with_drive_defaults()).await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let mut request = vec![1, 3, 0x01, 0x1A, 0x00, 0x01];
        append_crc(&mut request);
        client.send_to(&request, addr).await.unwrap();

        let mut buf = [0u8; MAX_ADU_SIZE];
        let received = assert_ok!(timeout(Duration::from_secs(2), client.recv_from(&mut buf)).await);
        let (len, from) = assert_ok!(received);
        assert_eq!(from, addr);
        assert_eq!(&buf[..5], &[1, 3, 2, 0x03, 0xE8]);
        assert_eq!(len, 7);
    }

    #[tokio::test]
    async fn test_shutdown() {
        let config = SimulatorConfig::new("127.0.0.1:0").unwrap();
        let mut sim = UdpSimulator::bind(config, RegisterStore::new()).await.unwrap();
        let result = assert_ok!(timeout(Duration::from_secs(2), sim.run_until(async {})).await);
        assert_ok!(result);
    }
}
