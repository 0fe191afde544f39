macro_rules! test_log {
    ($name:ident, $path:expr, $spacing:expr, $max_wps:expr, $waypoints:expr, $final_spacing:expr) => {
        #[test]
        #[tracing_test::traced_test]
        fn $name() {
            use crate::telemetry::read_samples;
            use crate::waypoints::decimate;

            let log = include_str!($path);
            let samples = read_samples(log.as_bytes(), None).unwrap();
            let result = decimate(&samples, $spacing, $max_wps);
            assert_eq!(result.waypoints.len(), $waypoints);
            assert_eq!(result.spacing, $final_spacing);
        }
    };
}

test_log!(
    northbound_all,
    "../tests/logs/northbound_21.csv",
    100.0,
    100,
    21,
    100.0
);

test_log!(
    northbound_spacing_200,
    "../tests/logs/northbound_21.csv",
    200.0,
    100,
    11,
    200.0
);

test_log!(
    northbound_max_10,
    "../tests/logs/northbound_21.csv",
    100.0,
    10,
    7,
    230.0
);

test_log!(
    northbound_max_5,
    "../tests/logs/northbound_21.csv",
    100.0,
    5,
    5,
    450.0
);

test_log!(
    no_fix,
    "../tests/logs/no_fix.csv",
    100.0,
    100,
    0,
    100.0
);

mod form_to_mission {
    use time::macros::datetime;

    use crate::form::{FormDefaults, MissionFormState};
    use crate::mission::Mission;
    use crate::units::UnitSystem;

    const LOG: &str = include_str!("../tests/logs/northbound_21.csv");

    fn form() -> MissionFormState {
        MissionFormState::new(&FormDefaults::at(datetime!(2025-09-13 14:05 UTC)).unwrap())
    }

    #[test]
    #[tracing_test::traced_test]
    fn metric_form() {
        let mut form = form();
        form.mission_name = "Alpha".into();
        form.custom_alt = "120".into();

        let params = form.mission_params("unused").unwrap();
        assert_eq!(params.filename, "Alpha.mission");

        let mission =
            Mission::from_log(LOG.as_bytes(), &params, datetime!(2025-09-13 14:05 UTC)).unwrap();
        assert_eq!(mission.items.len(), 21);
        assert!(mission.items.iter().all(|item| item.alt == 120 && item.speed == 694));
        assert!(logs_contain("created mission"));
    }

    #[test]
    fn imperial_form_is_converted_back() {
        let mut form = form();
        form.unit_system = UnitSystem::Imperial;
        form.cruise_speed = "15.5".into();
        form.custom_alt = "394".into();
        // just under 200 m
        form.spacing = "656".into();

        let params = form.mission_params("unused").unwrap();
        let mission =
            Mission::from_log(LOG.as_bytes(), &params, datetime!(2025-09-13 14:05 UTC)).unwrap();
        // 394 ft -> 120.09 m
        assert!(mission.items.iter().all(|item| item.alt == 120));
        // 15.5 mph -> 24.94 km/h -> 692 cm/s
        assert!(mission.items.iter().all(|item| item.speed == 692));
        assert_eq!(mission.items.len(), 11);
    }

    #[test]
    fn log_without_fix() {
        let params = form().mission_params("unused").unwrap();
        let err = Mission::from_log(
            include_str!("../tests/logs/no_fix.csv").as_bytes(),
            &params,
            datetime!(2025-09-13 14:05 UTC),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::Error::NoGpsData));
    }
}
