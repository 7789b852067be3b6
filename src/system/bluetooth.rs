//! Bluetooth module
//!
//! Advertises as a peripheral, reports phone connect/disconnect as
//! connectivity events, serves the battery level and accepts Current Time
//! Service writes to set the clock.

// Core
use core::mem;

// BLE
use nrf_softdevice::{
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

// Crate
use ringface::{clock::CTS_LEN, config::DEVICE_NAME, Event};

use crate::{CTS_WRITE, EVENTS};

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .full_name(DEVICE_NAME)
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
    pub cts: CurrentTimeService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[nrf_softdevice::gatt_service(uuid = "1805")]
pub struct CurrentTimeService {
    #[characteristic(uuid = "2a2b", read, write, notify)]
    pub current_time: [u8; CTS_LEN],
}

/// SoftDevice configuration: one peripheral link, no central role.
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Publish the battery level to connected clients.
pub fn publish_battery(server: &Server, percent: u8) {
    if let Err(e) = server.bas.battery_level_set(&percent) {
        defmt::warn!("Battery level update failed: {:?}", e);
    }
}

/// Publish the watch's local time so reads of the Current Time
/// characteristic return it.
pub fn publish_time(server: &Server, bytes: &[u8; CTS_LEN]) {
    if let Err(e) = server.cts.current_time_set(bytes) {
        defmt::warn!("Current time update failed: {:?}", e);
    }
}

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve one connection, repeat.
#[embassy_executor::task]
pub async fn peripheral_task(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                continue;
            }
        };

        defmt::info!("Phone connected");
        EVENTS.send(Event::Connectivity(true)).await;

        let reason = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
                defmt::info!("Battery notifications: {}", notifications);
            }
            ServerEvent::Cts(CurrentTimeServiceEvent::CurrentTimeWrite(bytes)) => {
                CTS_WRITE.signal(bytes);
            }
            ServerEvent::Cts(CurrentTimeServiceEvent::CurrentTimeCccdWrite { notifications }) => {
                defmt::info!("Time notifications: {}", notifications);
            }
        })
        .await;

        defmt::info!("Phone disconnected: {:?}", reason);
        EVENTS.send(Event::Connectivity(false)).await;
    }
}
