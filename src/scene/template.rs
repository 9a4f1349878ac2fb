use std::sync::Arc;

use crate::{
    foundation::core::{FrameIndex, Point},
    scene::model::{
        EasingCurve, Keyframe, Motion, MotionProperties, MotionProperty, ObjectKind, Scene,
        SceneObject,
    },
};

fn prop(from: (u64, f64), to: (u64, f64), p1: (f64, f64), p2: (f64, f64)) -> MotionProperty {
    MotionProperty {
        keyframes: [
            Keyframe {
                frame: FrameIndex(from.0),
                value: from.1,
            },
            Keyframe {
                frame: FrameIndex(to.0),
                value: to.1,
            },
        ],
        curve: EasingCurve {
            p1: Point::new(p1.0, p1.1),
            p2: Point::new(p2.0, p2.1),
        },
    }
}

impl Scene {
    /// The built-in authored scene the editor opens with.
    pub fn demo() -> Self {
        let ball = SceneObject {
            id: "C001-BouncingBall".to_owned(),
            kind: ObjectKind::Character,
            color: "#34d399".to_owned(),
            start_position: Point::new(100.0, 400.0),
            motions: vec![Arc::new(Motion {
                name: "ArcJump".to_owned(),
                start_frame: FrameIndex(0),
                end_frame: FrameIndex(100),
                properties: MotionProperties {
                    position_x: Some(prop((0, 100.0), (100, 700.0), (33.0, 300.0), (67.0, 500.0))),
                    // Overshoots upward and lands back on the start height.
                    position_y: Some(prop((0, 400.0), (100, 400.0), (30.0, 50.0), (70.0, 50.0))),
                    ..MotionProperties::default()
                },
            })],
            frame_data: None,
        };

        let box_ = SceneObject {
            id: "O002-SlidingBox".to_owned(),
            kind: ObjectKind::Prop,
            color: "#60a5fa".to_owned(),
            start_position: Point::new(800.0, 450.0),
            motions: vec![Arc::new(Motion {
                name: "SlideIn".to_owned(),
                start_frame: FrameIndex(10),
                end_frame: FrameIndex(90),
                properties: MotionProperties {
                    position_x: Some(prop((10, 800.0), (90, 200.0), (10.0, 800.0), (60.0, 200.0))),
                    position_y: Some(prop((10, 450.0), (90, 450.0), (30.0, 450.0), (70.0, 450.0))),
                    ..MotionProperties::default()
                },
            })],
            frame_data: None,
        };

        Self {
            id: "S001_Main_Street".to_owned(),
            duration: FrameIndex(120),
            objects: vec![Arc::new(ball), Arc::new(box_)],
        }
    }
}
