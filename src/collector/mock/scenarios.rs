//! Pre-built mock scenarios for testing.
//!
//! These provide realistic `/proc`, `/sys` and command-output states for a
//! Raspberry Pi and for a generic Linux box without the VideoCore tools.

use super::commands::MockCommands;
use super::filesystem::MockFs;

/// Formats one `/proc/diskstats` line with the given cumulative sector counts.
pub fn diskstats_line(major: u32, minor: u32, device: &str, rsect: u64, wsect: u64) -> String {
    format!(
        "{:4} {:7} {} 1200 30 {} 900 800 20 {} 700 0 1500 1600 0 0 0 0\n",
        major, minor, device, rsect, wsect
    )
}

/// Formats a `/proc/net/dev` table from `(interface, rx_bytes, tx_bytes)` rows.
pub fn net_dev_table(rows: &[(&str, u64, u64)]) -> String {
    let mut out = String::from(
        "Inter-|   Receive                                                |  Transmit\n \
         face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n",
    );
    for (iface, rx, tx) in rows {
        out.push_str(&format!(
            "{:>6}: {} 100 0 0 0 0 0 0 {} 90 0 0 0 0 0 0\n",
            iface, rx, tx
        ));
    }
    out
}

impl MockFs {
    /// A Raspberry Pi: SD card with two partitions, ram/loop block devices,
    /// ethernet plus wifi, and a thermal zone.
    pub fn raspberry_pi() -> Self {
        let fs = Self::new();

        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
ctxt 500000
btime 1700000000
",
        );

        let mut diskstats = String::new();
        diskstats.push_str(&diskstats_line(1, 0, "ram0", 0, 0));
        diskstats.push_str(&diskstats_line(7, 0, "loop0", 4096, 0));
        diskstats.push_str(&diskstats_line(179, 0, "mmcblk0", 200_000, 100_000));
        diskstats.push_str(&diskstats_line(179, 1, "mmcblk0p1", 2_000, 10));
        diskstats.push_str(&diskstats_line(179, 2, "mmcblk0p2", 198_000, 99_990));
        fs.add_file("/proc/diskstats", diskstats);

        fs.add_file(
            "/proc/net/dev",
            net_dev_table(&[
                ("lo", 5_000, 5_000),
                ("eth0", 1_000_000, 250_000),
                ("wlan0", 0, 0),
            ]),
        );

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        3884000 kB
MemFree:         1900000 kB
MemAvailable:    2913000 kB
Buffers:           90000 kB
Cached:           900000 kB
SwapTotal:        102396 kB
SwapFree:         102396 kB
",
        );

        fs.add_file("/sys/class/thermal/thermal_zone0/temp", "48312\n");
        fs
    }

    /// A generic Linux host with hwmon sensors and NVMe storage.
    ///
    /// The first hwmon chip reports 0 (an unpopulated input) so readers must
    /// skip to the next non-zero sensor.
    pub fn generic_host() -> Self {
        let fs = Self::new();

        fs.add_file(
            "/proc/stat",
            "cpu  40000 0 10000 150000 0 0 0 0 0 0\ncpu0 40000 0 10000 150000 0 0 0 0 0 0\n",
        );
        fs.add_file(
            "/proc/diskstats",
            diskstats_line(259, 0, "nvme0n1", 1_000_000, 500_000),
        );
        fs.add_file(
            "/proc/net/dev",
            net_dev_table(&[("lo", 100, 100), ("enp3s0", 9_000_000, 1_000_000)]),
        );
        fs.add_file(
            "/proc/meminfo",
            "MemTotal:       16000000 kB\nMemAvailable:    4000000 kB\n",
        );

        fs.add_file("/sys/class/hwmon/hwmon0/name", "acpitz\n");
        fs.add_file("/sys/class/hwmon/hwmon0/temp1_input", "0\n");
        fs.add_file("/sys/class/hwmon/hwmon1/name", "coretemp\n");
        fs.add_file("/sys/class/hwmon/hwmon1/temp1_input", "52000\n");
        fs.add_file("/sys/class/hwmon/hwmon1/temp2_input", "50000\n");
        fs.add_file("/sys/class/thermal/thermal_zone0/temp", "30000\n");
        fs
    }
}

impl MockCommands {
    /// `vcgencmd` and `hostname` as found on Raspberry Pi OS.
    pub fn raspberry_pi() -> Self {
        let cmds = Self::new();
        cmds.set_output("vcgencmd", &["measure_temp"], "temp=48.3'C\n");
        cmds.set_output("vcgencmd", &["measure_clock", "core"], "core=500000000\n");
        cmds.set_output("vcgencmd", &["get_throttled"], "throttled=0x50000\n");
        cmds.set_output("vcgencmd", &["measure_volts"], "volt=0.8563V\n");
        cmds.set_output("hostname", &["-I"], "192.168.1.42 fd00::1 \n");
        cmds
    }

    /// A host without the VideoCore tools.
    pub fn bare_host() -> Self {
        let cmds = Self::new();
        cmds.set_output("hostname", &["-I"], "10.0.0.7\n");
        cmds
    }
}
