//! Unit tests for transit-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PassengerId, StationId, TrainId};

    #[test]
    fn index_roundtrip() {
        let id = TrainId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TrainId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TrainId(0) < TrainId(1));
        assert!(StationId(100) > StationId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(TrainId::INVALID.0, u32::MAX);
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(PassengerId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(StationId(7).to_string(), "StationId(7)");
    }
}

#[cfg(test)]
mod registry {
    use crate::{Registry, TransitError};

    #[test]
    fn interning_is_identity() {
        let mut reg = Registry::new();
        let a = reg.intern_station("Park Street");
        let b = reg.intern_station("Park Street");
        assert_eq!(a, b);
        assert_eq!(reg.station_count(), 1);
    }

    #[test]
    fn ids_are_dense_in_registration_order() {
        let mut reg = Registry::new();
        let red = reg.intern_train("red");
        let green = reg.intern_train("green");
        assert_eq!(red.index(), 0);
        assert_eq!(green.index(), 1);
        assert!(red < green);
    }

    #[test]
    fn kinds_are_independent_namespaces() {
        let mut reg = Registry::new();
        let t = reg.intern_train("Park Street");
        let s = reg.intern_station("Park Street");
        // Same name, different kinds: both get index 0 of their own table.
        assert_eq!(t.index(), 0);
        assert_eq!(s.index(), 0);
        assert_eq!(reg.train_count(), 1);
        assert_eq!(reg.station_count(), 1);
    }

    #[test]
    fn lookup_does_not_create() {
        let mut reg = Registry::new();
        reg.intern_passenger("Anna");
        assert!(reg.passenger("Anna").is_ok());
        match reg.passenger("Brian") {
            Err(TransitError::UnknownName { kind, name }) => {
                assert_eq!(kind, "passenger");
                assert_eq!(name, "Brian");
            }
            other => panic!("expected UnknownName, got {other:?}"),
        }
        assert_eq!(reg.passenger_count(), 1);
    }

    #[test]
    fn names_roundtrip() {
        let mut reg = Registry::new();
        let id = reg.intern_station("Downtown Crossing");
        assert_eq!(reg.station_name(id), "Downtown Crossing");
    }

    #[test]
    fn id_iterators_cover_all_entities() {
        let mut reg = Registry::new();
        reg.intern_train("red");
        reg.intern_train("green");
        let ids: Vec<_> = reg.train_ids().collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(reg.train_name(ids[1]), "green");
    }
}
