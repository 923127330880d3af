//! Data behind the "Sleep Science Corner" chart on the resources page.

pub const TITLE: &str = "Typical 60-Minute Newborn Sleep Cycle";
/// Minutes shown on the x axis.
pub const X_BOUNDS: [f64; 2] = [0.0, 60.0];
/// Sleep depth shown on the y axis.
pub const Y_BOUNDS: [f64; 2] = [0.0, 2.5];
/// Labelled depths: awake, active (light) and deep sleep.
pub const Y_LABELS: [(f64, &str); 3] = [(0.0, "Awake"), (1.0, "Active"), (2.0, "Deep")];

const SAMPLE_EVERY_MINUTES: u32 = 2;

/// Depth of sleep at a given minute of the cycle.
pub fn depth_at(minute: u32) -> f64 {
    match minute {
        0..=4 => 0.2,
        5..=19 => 1.0,
        20..=39 => 2.0,
        40..=54 => 1.0,
        _ => 0.1,
    }
}

/// `(minute, depth)` samples from 0 to 60 inclusive.
pub fn sleep_cycle() -> Vec<(f64, f64)> {
    (0..=60)
        .step_by(SAMPLE_EVERY_MINUTES as usize)
        .map(|m| (m as f64, depth_at(m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_every_two_minutes() {
        let points = sleep_cycle();
        assert_eq!(points.len(), 31);
        assert_eq!(points.first(), Some(&(0.0, 0.2)));
        assert_eq!(points.last(), Some(&(60.0, 0.1)));
    }

    #[test]
    fn phases_follow_the_cycle() {
        assert_eq!(depth_at(4), 0.2);
        assert_eq!(depth_at(5), 1.0);
        assert_eq!(depth_at(20), 2.0);
        assert_eq!(depth_at(40), 1.0);
        assert_eq!(depth_at(55), 0.1);
    }
}
