use jnx_enrich::core::snmp::mibs::{host_resources, juniper};
use jnx_enrich::core::snmp::{Varbind, WalkSnapshot};

/// Two CPUs, one fan, one PEM; no temperature readings
pub fn four_entity_snapshot() -> WalkSnapshot {
    let indices = || (1..=4).map(|i| i.to_string());

    WalkSnapshot::default()
        .with_walk(
            juniper::JNX_OPERATING_DESCR,
            vec![
                Varbind::new("1", "Routing Engine 0 CPU"),
                Varbind::new("2", "FPC 0 CPU"),
                Varbind::new("3", "Fan Tray 1 Fan 2"),
                Varbind::new("4", "PEM 0"),
            ],
        )
        .with_walk(
            juniper::JNX_OPERATING_1MIN_AVG_CPU,
            indices().map(|i| Varbind::new(i, 4)).collect(),
        )
        .with_walk(
            juniper::JNX_OPERATING_MEMORY,
            vec![
                Varbind::new("1", 2048),
                Varbind::new("2", 1024),
                Varbind::new("3", 0),
                Varbind::new("4", 0),
            ],
        )
        .with_walk(
            juniper::JNX_OPERATING_BUFFER,
            vec![Varbind::new("1", 50), Varbind::new("2", 25)],
        )
        .with_walk(
            juniper::JNX_OPERATING_STATE,
            indices().map(|i| Varbind::new(i, 2)).collect(),
        )
}

/// hrStorageTable where index 7 has no allocation unit
pub fn storage_walks(snapshot: WalkSnapshot) -> WalkSnapshot {
    snapshot
        .with_walk(
            host_resources::HR_STORAGE_DESCR,
            vec![
                Varbind::new("1", "/dev/gpt/junos: root file system, mounted on: /.mount"),
                Varbind::new("7", "/dev/md0: tmp"),
            ],
        )
        .with_walk(
            host_resources::HR_STORAGE_TYPE,
            vec![
                Varbind::new("1", ".1.3.6.1.2.1.25.2.1.4"),
                Varbind::new("7", ".1.3.6.1.2.1.25.2.1.8"),
            ],
        )
        .with_walk(
            host_resources::HR_STORAGE_ALLOCATION_UNITS,
            vec![Varbind::new("1", 4096)],
        )
        .with_walk(
            host_resources::HR_STORAGE_SIZE,
            vec![Varbind::new("1", 1000), Varbind::new("7", 64)],
        )
        .with_walk(
            host_resources::HR_STORAGE_USED,
            vec![Varbind::new("1", 250), Varbind::new("7", 2)],
        )
        .with_walk(
            host_resources::HR_STORAGE_ALLOCATION_FAILURES,
            vec![Varbind::new("1", 0), Varbind::new("7", 3)],
        )
}
