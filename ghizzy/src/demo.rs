//! Runs every behavior against a scripted stream and a simulated board,
//! printing the transition lines and the commands each one sent.

use duelink_link::{Link, SimulatedBoard};
use ghizzy::behavior::{Behavior, FingerBlink, MotionBlink, MouthWatch, SmileBlink};
use ghizzy::{
    run_fan_follow, run_until_cancelled, CancelToken, FanFollow, FanFollowConfig, Pacing,
    ScriptedSource,
};
use landmark_signal::face::{LOWER_LIP, MOUTH_LEFT, MOUTH_RIGHT, UPPER_LIP};
use landmark_signal::{
    Blendshape, FaceDetection, HandDetection, Handedness, Landmark, LandmarkSet, Observation,
};

fn main() {
    println!("\n=== Ghizzy Demo ===\n");

    // ── 1. Fan-follow ─────────────────────────────────────────────────────
    println!("1. Fan-follow, readings 30 30 10 10 20");
    let cfg = FanFollowConfig { pacing: Pacing::ZERO, ..Default::default() };
    let mut link = Link::new(SimulatedBoard::with_readings([30, 30, 10, 10, 20]));
    let mut out = Vec::new();
    // The script runs dry after five readings and the board "disconnects".
    let end = run_fan_follow(&mut FanFollow::new(cfg), &mut link, &CancelToken::new(), &mut out);
    print_run(&out, link.transport().history());
    if let Err(e) = end {
        println!("   ended: {}", e);
    }
    println!();

    // ── 2. Finger count ───────────────────────────────────────────────────
    println!("2. Finger count, 2 → 2 → none → 2 → 0");
    let frames = vec![hand(2, 0.4), hand(2, 0.4), Observation::empty(), hand(2, 0.4), hand(0, 0.4)];
    demo(FingerBlink::new(Default::default()), frames);

    // ── 3. Hand motion ────────────────────────────────────────────────────
    println!("3. Hand motion, index tip at x = 0.20 0.20 0.25 0.26 0.40");
    let frames = [0.20, 0.20, 0.25, 0.26, 0.40].iter().map(|&x| hand(5, x)).collect();
    demo(MotionBlink::default(), frames);

    // ── 4. Mouth ──────────────────────────────────────────────────────────
    println!("4. Mouth, open ratio 0.2 → 0.4 → 0.4 → 0.1");
    let frames = [0.2, 0.4, 0.4, 0.1].iter().map(|&r| mouth(r)).collect();
    demo(MouthWatch::default(), frames);

    // ── 5. Smile ──────────────────────────────────────────────────────────
    println!("5. Smile, scores (0.4,0.3) (0.8,0.6) (0.8,0.6) (0.1,0.1)");
    let frames = [(0.4, 0.3), (0.8, 0.6), (0.8, 0.6), (0.1, 0.1)]
        .iter()
        .map(|&(l, r)| smile(l, r))
        .collect();
    demo(SmileBlink::default(), frames);
}

fn demo<B: Behavior>(mut behavior: B, frames: Vec<Observation>) {
    let mut source = ScriptedSource::new(frames);
    let mut link = Link::new(SimulatedBoard::new());
    let mut out = Vec::new();
    match run_until_cancelled(&mut source, &mut behavior, &mut link, &CancelToken::new(), &mut out) {
        Ok(_)  => print_run(&out, link.transport().history()),
        Err(e) => println!("   error: {}", e),
    }
    println!();
}

fn print_run(out: &[u8], sent: &[String]) {
    for line in String::from_utf8_lossy(out).lines() {
        println!("   log:  {}", line);
    }
    println!("   sent: {}", sent.join(" "));
}

// ── Synthetic observations ───────────────────────────────────────────────

/// A right hand with `fingers` extended (thumb first) and the index tip at `x`.
fn hand(fingers: u8, x: f32) -> Observation {
    let mut p = vec![Landmark::new(0.5, 0.5); 21];
    if fingers >= 1 {
        p[4] = Landmark::new(0.6, 0.5);
    }
    for (k, (tip, pip)) in [(8, 6), (12, 10), (16, 14), (20, 18)].into_iter().enumerate() {
        if fingers as usize >= k + 2 {
            p[pip] = Landmark::new(0.5, 0.6);
            p[tip] = Landmark::new(0.5, 0.3);
        }
    }
    p[8].x = x;
    Observation::with_hand(HandDetection {
        handedness: Handedness::Right,
        landmarks:  LandmarkSet::new(p),
    })
}

/// A face whose mouth is 0.1 wide and `ratio` × 0.1 open.
fn mouth(ratio: f32) -> Observation {
    let mut p = vec![Landmark::default(); 478];
    p[UPPER_LIP]   = Landmark::new(0.5, 0.5);
    p[LOWER_LIP]   = Landmark::new(0.5, 0.5 + ratio * 0.1);
    p[MOUTH_LEFT]  = Landmark::new(0.45, 0.52);
    p[MOUTH_RIGHT] = Landmark::new(0.55, 0.52);
    Observation::with_face(FaceDetection { landmarks: LandmarkSet::new(p), blendshapes: vec![] })
}

fn smile(left: f64, right: f64) -> Observation {
    let shape = |name: &str, score| Blendshape { category_name: name.to_string(), score };
    Observation::with_face(FaceDetection {
        landmarks:   LandmarkSet::default(),
        blendshapes: vec![shape("mouthSmileLeft", left), shape("mouthSmileRight", right)],
    })
}
