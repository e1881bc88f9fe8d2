#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{Quat, Vec3};

    use crate::commands::{InputEvent, SessionCommand};
    use crate::config::{cap, SimConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::state::FrameSnapshot;
    use crate::types::{FrameTime, Pose, Sphere};

    #[test]
    fn test_mode_identifiers() {
        assert_eq!("day".parse::<Mode>().unwrap(), Mode::Day);
        assert_eq!("night".parse::<Mode>().unwrap(), Mode::Night);
        assert!("dusk".parse::<Mode>().is_err());
        assert_eq!(Mode::Day.toggled(), Mode::Night);
        assert_eq!(Mode::Night.toggled().toggled(), Mode::Night);
        assert_eq!(Mode::Day.to_string(), "day");
    }

    #[test]
    fn test_mode_serde_uses_identifier() {
        assert_eq!(serde_json::to_string(&Mode::Day).unwrap(), "\"day\"");
        let back: Mode = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(back, Mode::Night);
    }

    #[test]
    fn test_grab_priority_and_capabilities() {
        assert_eq!(
            GrabbableKind::PRIORITY,
            [
                GrabbableKind::Weapon,
                GrabbableKind::LightSource,
                GrabbableKind::Prop
            ]
        );
        assert_eq!(GrabbableKind::Weapon.capability(), Capability::Weapon);
        assert_eq!(
            GrabbableKind::LightSource.capability(),
            Capability::LightSource
        );
        assert_eq!(GrabbableKind::Prop.capability(), Capability::None);
    }

    #[test]
    fn test_pose_forward() {
        assert!((Pose::IDENTITY.forward() - Vec3::NEG_Z).length() < 1e-6);

        // Quarter turn left around +Y faces -X.
        let left = Pose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        assert!(
            (left.forward() - Vec3::NEG_X).length() < 1e-6,
            "got {:?}",
            left.forward()
        );
    }

    #[test]
    fn test_pose_compose() {
        let parent = Pose::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let child = Pose::at(Vec3::new(0.0, 0.0, -1.0));
        let world = parent.compose(&child);
        assert!((world.position - Vec3::new(0.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_pose_is_finite() {
        assert!(Pose::IDENTITY.is_finite());
        assert!(!Pose::at(Vec3::new(f32::NAN, 0.0, 0.0)).is_finite());
        let spun = Pose::new(Vec3::ZERO, Quat::from_xyzw(0.0, f32::INFINITY, 0.0, 1.0));
        assert!(!spun.is_finite());
    }

    #[test]
    fn test_sphere_contains() {
        let s = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5);
        assert!(s.contains(Vec3::new(0.0, 1.4, 0.0)));
        assert!(!s.contains(Vec3::new(0.0, 1.6, 0.0)));
    }

    #[test]
    fn test_frame_time_first_delta_is_zero() {
        let mut time = FrameTime::default();
        time.advance(5000.0);
        assert_eq!(time.frame, 1);
        assert_eq!(time.delta_secs, 0.0);

        time.advance(5016.0);
        assert_eq!(time.frame, 2);
        assert!((time.delta_secs - 0.016).abs() < 1e-6);

        // A timestamp going backwards never yields a negative delta.
        time.advance(5000.0);
        assert_eq!(time.delta_secs, 0.0);
    }

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.initial_mode, Mode::Night);
        assert_eq!(config.grab_distance, 0.25);
        assert_eq!(config.fragment_count, 20);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_partial_json() {
        let config =
            SimConfig::from_json_str(r#"{ "initial_mode": "day", "seed": 9, "max_targets": 0 }"#)
                .unwrap();
        assert_eq!(config.initial_mode, Mode::Day);
        assert_eq!(config.seed, Some(9));
        assert_eq!(cap(config.max_targets), None);
        assert_eq!(cap(config.max_projectiles), Some(256));
        assert_eq!(config.projectile_speed, 0.6);
    }

    #[test]
    fn test_config_errors() {
        let err = SimConfig::from_json_str(r#"{ "initial_mode": "dusk" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = SimConfig::from_json_file("/nonexistent/thicket.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/thicket.json"));
    }

    #[test]
    fn test_session_command_serde() {
        let commands = vec![
            SessionCommand::from(InputEvent::Squeeze { hand: Hand::Left }),
            SessionCommand::from(InputEvent::Thumbstick {
                hand: Hand::Left,
                x: 0.5,
                y: -1.0,
            }),
            SessionCommand::SetMode { mode: Mode::Day },
            SessionCommand::ToggleMode,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: SessionCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let mut snapshot = FrameSnapshot::default();
        snapshot.events.push(SimEvent::LightToggled { on: false });
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, snapshot.mode);
        assert_eq!(back.events, snapshot.events);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }
}
