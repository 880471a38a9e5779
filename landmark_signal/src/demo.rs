//! Demonstrates the landmark extractors on hand-built detections.

use landmark_signal::{
    count_fingers, mouth_open_ratio, smile_score, Blendshape, Debouncer, FaceDetection,
    HandDetection, Handedness, Landmark, LandmarkSet, MotionTracker, MouthState, SmileState,
};
use landmark_signal::face::{LOWER_LIP, MOUTH_LEFT, MOUTH_RIGHT, MOUTH_OPEN_RATIO, SMILE_CUTOFF, UPPER_LIP};

fn main() {
    println!("\n=== Landmark Signal Demo ===\n");

    // ── 1. Finger counting ────────────────────────────────────────────────
    println!("1. Finger count for an open right hand");
    let mut points = vec![Landmark::new(0.5, 0.5); 21];
    points[4] = Landmark::new(0.6, 0.5);            // thumb tip right of IP
    for (tip, pip) in [(8, 6), (12, 10), (16, 14), (20, 18)] {
        points[pip] = Landmark::new(0.5, 0.6);
        points[tip] = Landmark::new(0.5, 0.3);
    }
    let hand = HandDetection { handedness: Handedness::Right, landmarks: LandmarkSet::new(points) };
    println!("   fingers = {}\n", count_fingers(&hand).unwrap());

    // ── 2. Debounced count stream ─────────────────────────────────────────
    println!("2. Debounced counts 2 2 2 3 3 0");
    let mut d = Debouncer::new();
    for c in [2u8, 2, 2, 3, 3, 0] {
        if d.update(c) { println!("   emit {}", c); }
    }
    println!();

    // ── 3. Motion ─────────────────────────────────────────────────────────
    println!("3. Index-tip x 100 100 100 112 (threshold 8 px)");
    let mut m = MotionTracker::new(8);
    for x in [100, 100, 100, 112] {
        match m.update(x) {
            Some(dx) => println!("   x={:>3}  moved {:+}", x, dx),
            None     => println!("   x={:>3}  still", x),
        }
    }
    println!();

    // ── 4. Mouth ratio ────────────────────────────────────────────────────
    println!("4. Mouth openness");
    for gap in [0.02f32, 0.04] {
        let mut pts = vec![Landmark::default(); 300];
        pts[UPPER_LIP]   = Landmark::new(0.5, 0.5);
        pts[LOWER_LIP]   = Landmark::new(0.5, 0.5 + gap);
        pts[MOUTH_LEFT]  = Landmark::new(0.45, 0.55);
        pts[MOUTH_RIGHT] = Landmark::new(0.55, 0.55);
        let face = FaceDetection { landmarks: LandmarkSet::new(pts), blendshapes: vec![] };
        let r = mouth_open_ratio(&face).unwrap();
        println!("   gap={:.2}  ratio={:.2}  → {}", gap, r, MouthState::classify(r, MOUTH_OPEN_RATIO));
    }
    println!();

    // ── 5. Smile score ────────────────────────────────────────────────────
    println!("5. Smile score");
    for (l, r) in [(0.4, 0.3), (0.7, 0.5)] {
        let face = FaceDetection {
            landmarks: LandmarkSet::default(),
            blendshapes: vec![
                Blendshape { category_name: "mouthSmileLeft".into(),  score: l },
                Blendshape { category_name: "mouthSmileRight".into(), score: r },
            ],
        };
        let s = smile_score(&face);
        println!("   left={:.2} right={:.2}  avg={:.3}  → {}", l, r, s, SmileState::classify(s, SMILE_CUTOFF));
    }
    println!();
}
