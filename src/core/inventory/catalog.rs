use super::types::EntityCatalog;
use crate::core::snmp::Varbind;

/// Build the index -> name catalog from a jnxOperatingDescr walk.
///
/// Descriptions are decoded as ASCII; bytes outside it are dropped rather
/// than failing the cycle. A repeated index overwrites the earlier name.
pub fn build_catalog(varbinds: &[Varbind]) -> EntityCatalog {
    varbinds
        .iter()
        .map(|varbind| (varbind.index.clone(), varbind.value.to_ascii_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snmp::SnmpValue;

    #[test]
    fn test_build_catalog() {
        let catalog = build_catalog(&[
            Varbind::new("1.0.0.0", "Routing Engine 0"),
            Varbind {
                index: "2.0.0.0".to_string(),
                value: SnmpValue::OctetString(vec![b'P', b'E', b'M', 0xc3, 0xa9]),
            },
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["1.0.0.0"], "Routing Engine 0");
        assert_eq!(catalog["2.0.0.0"], "PEM");
    }

    #[test]
    fn test_empty_walk_gives_empty_catalog() {
        assert!(build_catalog(&[]).is_empty());
    }
}
