fn main() {
    println!("cargo:rerun-if-env-changed=COLLISION_ALERT_CONFIG");
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASS");
    println!("cargo:rerun-if-env-changed=TELEMETRY_API_KEY");

    // ESP-IDF link arguments are only needed for the firmware image;
    // host builds (tests) skip them.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
