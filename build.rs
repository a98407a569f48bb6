fn main() {
    // Host builds have nothing to generate; only the ESP-IDF toolchain
    // needs its environment exported to the linker.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
