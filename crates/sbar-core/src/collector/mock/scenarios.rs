//! Pre-built mock filesystem scenarios for testing.

use super::filesystem::MockFs;

impl MockFs {
    /// A laptop with one battery, a coretemp sensor, a fan and a wireless link.
    ///
    /// Rooted at `/proc` and `/sys`.
    pub fn laptop() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/loadavg", "0.50 0.60 0.70 2/512 4242\n");
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 5000 250 1500 40000 500 100 50 0 0 0
cpu1 5000 250 1500 40000 500 100 50 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16000000 kB
MemFree:         2000000 kB
MemAvailable:    8000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/net/wireless",
            "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
wlan0: 0000   61.  -49.  -256        0      0      0      0     12        0
",
        );

        fs.add_file("/sys/class/power_supply/AC/type", "Mains\n");
        fs.add_file("/sys/class/power_supply/AC/online", "1\n");
        fs.add_file("/sys/class/power_supply/BAT0/type", "Battery\n");
        fs.add_file("/sys/class/power_supply/BAT0/charge_full", "5000000\n");
        fs.add_file("/sys/class/power_supply/BAT0/charge_now", "4000000\n");

        fs.add_file("/sys/class/hwmon/hwmon0/name", "acpitz\n");
        fs.add_file("/sys/class/hwmon/hwmon0/temp1_input", "27800\n");
        fs.add_file("/sys/class/hwmon/hwmon1/name", "coretemp\n");
        fs.add_file("/sys/class/hwmon/hwmon1/temp1_label", "Package id 0\n");
        fs.add_file("/sys/class/hwmon/hwmon1/temp1_input", "52000\n");
        fs.add_file("/sys/class/hwmon/hwmon2/name", "thinkpad\n");
        fs.add_file("/sys/class/hwmon/hwmon2/device/fan1_output", "2600\n");
        fs.add_file("/sys/class/hwmon/hwmon2/device/fan1_max", "6000\n");

        fs.add_file("/sys/class/net/lo/operstate", "unknown\n");
        fs.add_file("/sys/class/net/lo/type", "772\n");
        fs.add_file("/sys/class/net/lo/statistics/rx_bytes", "1000\n");
        fs.add_file("/sys/class/net/lo/statistics/tx_bytes", "1000\n");
        fs.add_file("/sys/class/net/eth0/operstate", "down\n");
        fs.add_file("/sys/class/net/eth0/type", "1\n");
        fs.add_file("/sys/class/net/eth0/statistics/rx_bytes", "0\n");
        fs.add_file("/sys/class/net/eth0/statistics/tx_bytes", "0\n");
        fs.add_file("/sys/class/net/wlan0/operstate", "up\n");
        fs.add_file("/sys/class/net/wlan0/type", "1\n");
        fs.add_file("/sys/class/net/wlan0/statistics/rx_bytes", "5000000\n");
        fs.add_file("/sys/class/net/wlan0/statistics/tx_bytes", "200000\n");

        fs
    }

    /// A headless box: `/proc` only, no battery, sensors or network links.
    pub fn headless() -> Self {
        let fs = Self::new();
        fs.add_file("/proc/loadavg", "3.10 2.20 1.05 9/300 777\n");
        fs.add_dir("/sys/class/power_supply");
        fs.add_dir("/sys/class/hwmon");
        fs.add_dir("/sys/class/net");
        fs
    }
}
