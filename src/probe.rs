#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

use std::{
    io,
    net::{SocketAddr, ToSocketAddrs, UdpSocket},
    thread,
    time::Duration,
};

use thiserror::Error;

const RECV_BUFFER_LEN: usize = 1024;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not resolve \"{0}\"")]
    Resolve(String),
    #[error("could not bind local port {0}: {1}")]
    Bind(u16, io::Error),
    #[error("socket error talking to {0}: {1}")]
    Socket(SocketAddr, io::Error),
    #[error("no datagram within {0:?}")]
    RecvTimeout(Duration),
}

/// How to poke the endpoint: reply with the fixed payload each time a
/// datagram arrives, or send it blindly on a fixed interval. No framing
/// or acknowledgment on top of that.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub host:      String,
    pub port:      u16,
    pub bind_port: u16,
    pub payload:   String,
    pub interval:  Option<Duration>,
    pub timeout:   Option<Duration>,
    pub limit:     usize,
}

/// A socket bound and ready to run. Binding is separate from running so
/// the ephemeral port is observable when `bind_port` is 0.
#[derive(Debug)]
pub struct Prober {
    socket: UdpSocket,
    dest:   SocketAddr,
    config: ProbeConfig,
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, ProbeError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|_| ProbeError::Resolve(format!("{host}:{port}")))?;
    addrs
        .next()
        .ok_or_else(|| ProbeError::Resolve(format!("{host}:{port}")))
}

impl Prober {
    pub fn bind(config: ProbeConfig) -> Result<Self, ProbeError> {
        let dest = resolve(&config.host, config.port)?;
        let socket = UdpSocket::bind(("0.0.0.0", config.bind_port))
            .map_err(|err| ProbeError::Bind(config.bind_port, err))?;
        if config.timeout.is_some() {
            socket
                .set_read_timeout(config.timeout)
                .map_err(|err| ProbeError::Socket(dest, err))?;
        }
        if let Ok(local) = socket.local_addr() {
            log::debug!("bound {local}, destination {dest}");
        }
        Ok(Self { socket, dest, config })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.socket.local_addr() }

    pub fn run(&self) -> Result<(), ProbeError> {
        match self.config.interval {
            Some(interval) => self.run_interval(interval),
            None => self.run_reply(),
        }
    }

    /// Blind variant: fixed payload to the destination every `interval`,
    /// nothing read back.
    fn run_interval(&self, interval: Duration) -> Result<(), ProbeError> {
        let mut sent = 0;
        loop {
            self.send()?;
            sent += 1;
            if self.config.limit != 0 && sent == self.config.limit {
                return Ok(());
            }
            thread::sleep(interval);
        }
    }

    /// Reply variant: block until a datagram arrives, print it, answer
    /// with the fixed payload, repeat.
    fn run_reply(&self) -> Result<(), ProbeError> {
        let mut buf = [0u8; RECV_BUFFER_LEN];
        let mut exchanges = 0;
        loop {
            let (len, from) = self.recv(&mut buf)?;
            println!(
                "{} bytes from {}: {}",
                len,
                from,
                String::from_utf8_lossy(&buf[..len]).trim_end()
            );
            self.send()?;
            exchanges += 1;
            if self.config.limit != 0 && exchanges == self.config.limit {
                return Ok(());
            }
        }
    }

    fn send(&self) -> Result<(), ProbeError> {
        let sent = self
            .socket
            .send_to(self.config.payload.as_bytes(), self.dest)
            .map_err(|err| ProbeError::Socket(self.dest, err))?;
        log::debug!("sent {} bytes to {}", sent, self.dest);
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), ProbeError> {
        match self.socket.recv_from(buf) {
            Ok(pair) => Ok(pair),
            Err(err)
                if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
            {
                // read timeout is the only reason those kinds show up here
                Err(ProbeError::RecvTimeout(self.config.timeout.unwrap_or_default()))
            }
            Err(err) => Err(ProbeError::Socket(self.dest, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dest: SocketAddr) -> ProbeConfig {
        ProbeConfig {
            host:      dest.ip().to_string(),
            port:      dest.port(),
            bind_port: 0,
            payload:   String::from("hello, from ubuntu"),
            interval:  None,
            timeout:   None,
            limit:     1,
        }
    }

    #[test]
    fn interval_mode_sends_fixed_payload() {
        let endpoint = UdpSocket::bind("127.0.0.1:0").unwrap();
        endpoint.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

        let mut cfg = config(endpoint.local_addr().unwrap());
        cfg.interval = Some(Duration::from_millis(1));
        cfg.limit = 2;

        Prober::bind(cfg).unwrap().run().unwrap();

        let mut buf = [0u8; 64];
        for _ in 0..2 {
            let (len, _) = endpoint.recv_from(&mut buf).unwrap();
            assert_eq!(&buf[..len], b"hello, from ubuntu");
        }
    }

    #[test]
    fn reply_mode_answers_each_datagram() {
        let endpoint = UdpSocket::bind("127.0.0.1:0").unwrap();
        endpoint.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

        let prober = Prober::bind(config(endpoint.local_addr().unwrap())).unwrap();
        let probe_port = prober.local_addr().unwrap().port();

        let poker = thread::spawn(move || {
            endpoint
                .send_to(b"ping", ("127.0.0.1", probe_port))
                .unwrap();
            let mut buf = [0u8; 64];
            let (len, _) = endpoint.recv_from(&mut buf).unwrap();
            assert_eq!(&buf[..len], b"hello, from ubuntu");
        });

        prober.run().unwrap();
        poker.join().unwrap();
    }

    #[test]
    fn reply_mode_times_out_without_traffic() {
        let endpoint = UdpSocket::bind("127.0.0.1:0").unwrap();

        let mut cfg = config(endpoint.local_addr().unwrap());
        cfg.timeout = Some(Duration::from_millis(50));

        let err = Prober::bind(cfg).unwrap().run().unwrap_err();
        assert!(matches!(err, ProbeError::RecvTimeout(_)));
    }
}
