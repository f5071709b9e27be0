//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements    | Connects to                    |
//! |------------------|---------------|--------------------------------|
//! | `status_display` | StatusPort    | any `DisplayPort`              |
//! | `text_display`   | DisplayPort   | embedded-graphics frame buffer |
//! | `telemetry`      | TelemetryPort | any `NetworkPort` (HTTP GET)   |
//! | `tcp`            | NetworkPort   | `std::net` TCP                 |
//! | `gps_sim`        | LocationPort  | seeded pseudo-random fixes     |
//! | `wifi`           | —             | ESP-IDF WiFi STA bring-up      |

pub mod gps_sim;
pub mod status_display;
pub mod tcp;
pub mod telemetry;
pub mod text_display;
pub(crate) mod utils;
pub mod wifi;
