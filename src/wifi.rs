//! WiFi association and the TCP firmware-update listener.
//!
//! Implements the library's `NetServices` trait over the blocking esp-wifi
//! controller and a `blocking-network-stack` TCP socket. All of this is
//! driven from the cooperative tick; nothing here blocks once the listener
//! is up.

use blocking_network_stack::Stack;
use embedded_storage::Storage;
use esp_hal::peripherals::{RNG, TIMG0, WIFI};
use esp_hal::rng::Rng;
use esp_hal::time::Instant;
use esp_hal::timer::timg::TimerGroup;
use esp_println::println;
use esp_wifi::wifi::{self, ClientConfiguration, Configuration, WifiController, WifiDevice};
use smoltcp::iface::{SocketSet, SocketStorage};
use smoltcp::wire::{EthernetAddress, HardwareAddress};
use static_cell::StaticCell;

use dial_pendant::config::OTA_LISTEN_PORT;
use dial_pendant::ota::{NetError, NetServices, UpdateEvent};

/// Flash offset of the passive app partition updates are staged into.
const OTA_STAGING_OFFSET: u32 = 0x11_0000;

/// Update-protocol error codes surfaced in the OTA status record.
const ERR_CONNECTION: u8 = 1;
const ERR_AUTH: u8 = 2;
const ERR_FLASH: u8 = 3;

static WIFI_CTRL: StaticCell<esp_wifi::EspWifiController<'static>> = StaticCell::new();
static SOCKET_STORAGE: StaticCell<[SocketStorage<'static>; 3]> = StaticCell::new();
static STACK: StaticCell<Stack<'static, WifiDevice<'static>>> = StaticCell::new();
static RX_BUFFER: StaticCell<[u8; 1536]> = StaticCell::new();
static TX_BUFFER: StaticCell<[u8; 1536]> = StaticCell::new();

#[derive(Clone, Copy)]
enum ListenerState {
    Idle,
    Listening,
    Receiving { staged: u32, authed: bool },
}

pub struct EspNet {
    controller: WifiController<'static>,
    stack: &'static Stack<'static, WifiDevice<'static>>,
    socket: Option<blocking_network_stack::Socket<'static, 'static, WifiDevice<'static>>>,
    state: ListenerState,
    auth_secret: Option<heapless::String<64>>,
    flash: esp_storage::FlashStorage,
}

impl EspNet {
    pub fn init(timg0: TIMG0<'static>, rng: RNG<'static>, wifi: WIFI<'static>) -> Self {
        let timg0 = TimerGroup::new(timg0);
        let mut rng = Rng::new(rng);
        let seed = rng.random();

        let ctrl = WIFI_CTRL.init(esp_wifi::init(timg0.timer0, rng).expect("wifi init"));
        let (controller, interfaces) = wifi::new(ctrl, wifi).expect("wifi interfaces");
        let mut device = interfaces.sta;

        let iface = smoltcp::iface::Interface::new(
            smoltcp::iface::Config::new(HardwareAddress::Ethernet(EthernetAddress::from_bytes(
                &device.mac_address(),
            ))),
            &mut device,
            timestamp(),
        );

        let storage = SOCKET_STORAGE.init(Default::default());
        let mut socket_set = SocketSet::new(&mut storage[..]);
        socket_set.add(smoltcp::socket::dhcpv4::Socket::new());

        let stack = STACK.init(Stack::new(iface, device, socket_set, timestamp_ms, seed));

        Self {
            controller,
            stack,
            socket: None,
            state: ListenerState::Idle,
            auth_secret: None,
            flash: esp_storage::FlashStorage::new(),
        }
    }

    /// Re-arm the listener after a client went away.
    fn relisten(&mut self) {
        if let Some(socket) = self.socket.as_mut() {
            socket.close();
            if socket.listen(OTA_LISTEN_PORT).is_ok() {
                self.state = ListenerState::Listening;
            } else {
                self.state = ListenerState::Idle;
            }
        }
    }
}

fn timestamp() -> smoltcp::time::Instant {
    smoltcp::time::Instant::from_millis(
        Instant::now().duration_since_epoch().as_millis() as i64
    )
}

fn timestamp_ms() -> u64 {
    Instant::now().duration_since_epoch().as_millis()
}

impl NetServices for EspNet {
    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<(), NetError> {
        let client_config = Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| NetError::Radio)?,
            password: password.try_into().map_err(|_| NetError::Radio)?,
            ..Default::default()
        });
        self.controller
            .set_configuration(&client_config)
            .map_err(|_| NetError::Radio)?;
        self.controller.start().map_err(|_| NetError::Radio)?;
        self.controller.connect().map_err(|_| NetError::Radio)?;
        Ok(())
    }

    fn connection_up(&mut self) -> bool {
        self.stack.work();
        self.controller.is_connected().unwrap_or(false) && self.stack.is_iface_up()
    }

    fn local_ip(&mut self) -> Option<[u8; 4]> {
        self.stack.get_ip_info().ok().map(|info| info.ip.octets())
    }

    fn start_listener(
        &mut self,
        hostname: &str,
        auth_secret: Option<&str>,
    ) -> Result<(), NetError> {
        self.auth_secret = auth_secret.map(|secret| {
            let mut s = heapless::String::new();
            let _ = s.push_str(secret);
            s
        });

        let rx = RX_BUFFER.init([0; 1536]);
        let tx = TX_BUFFER.init([0; 1536]);
        let mut socket = self.stack.get_socket(rx, tx);
        socket.listen(OTA_LISTEN_PORT).map_err(|_| NetError::Listener)?;
        self.socket = Some(socket);
        self.state = ListenerState::Listening;
        println!("ota: listening as '{}' on port {}", hostname, OTA_LISTEN_PORT);
        Ok(())
    }

    fn poll(&mut self) -> Option<UpdateEvent> {
        let socket = self.socket.as_mut()?;
        socket.work();

        match self.state {
            ListenerState::Idle => None,
            ListenerState::Listening => {
                if socket.is_connected() {
                    self.state = ListenerState::Receiving {
                        staged: 0,
                        authed: self.auth_secret.is_none(),
                    };
                    Some(UpdateEvent::Started)
                } else {
                    None
                }
            }
            ListenerState::Receiving { staged, authed } => {
                if !socket.is_connected() {
                    // Stream closed: the image is fully staged.
                    // TODO: mark the staged image bootable once
                    // esp-bootloader-esp-idf exposes otadata writes.
                    self.relisten();
                    return if staged > 0 {
                        Some(UpdateEvent::Completed)
                    } else {
                        Some(UpdateEvent::Error(ERR_CONNECTION))
                    };
                }
                let mut chunk = [0u8; 512];
                match socket.read(&mut chunk) {
                    Ok(0) => None,
                    Ok(n) => {
                        let mut data = &chunk[..n];
                        if !authed {
                            let accepted = match &self.auth_secret {
                                Some(secret) if data.starts_with(secret.as_bytes()) => {
                                    secret.len()
                                }
                                Some(_) => {
                                    self.relisten();
                                    return Some(UpdateEvent::Error(ERR_AUTH));
                                }
                                None => 0,
                            };
                            data = &data[accepted..];
                        }
                        if self
                            .flash
                            .write(OTA_STAGING_OFFSET + staged, data)
                            .is_err()
                        {
                            self.relisten();
                            return Some(UpdateEvent::Error(ERR_FLASH));
                        }
                        self.state = ListenerState::Receiving {
                            staged: staged + data.len() as u32,
                            authed: true,
                        };
                        None
                    }
                    Err(_) => {
                        self.relisten();
                        Some(UpdateEvent::Error(ERR_CONNECTION))
                    }
                }
            }
        }
    }
}
