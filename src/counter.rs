/// Parses the leading integer of a `data-count` value.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"150+"` counts to 150. Returns `None` when there are no
/// digits at all.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = rest[..digits_end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: i64, steps: u32) -> Self {
        Self {
            target,
            increment: target as f64 / f64::from(steps.max(1)),
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> CounterFrame {
        self.current += self.increment;

        if self.current >= self.target as f64 {
            CounterFrame {
                text: self.target.to_string(),
                finished: true,
            }
        } else {
            CounterFrame {
                text: (self.current.floor() as i64).to_string(),
                finished: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: i64, steps: u32) -> Vec<CounterFrame> {
        let mut animation = CounterAnimation::new(target, steps);
        let mut frames = Vec::new();

        for _ in 0..(steps * 2) {
            let frame = animation.step();
            let finished = frame.finished;
            frames.push(frame);
            if finished {
                break;
            }
        }

        frames
    }

    #[test]
    fn parse_target_reads_leading_integer() {
        assert_eq!(parse_target("150"), Some(150));
        assert_eq!(parse_target("  98%"), Some(98));
        assert_eq!(parse_target("+12"), Some(12));
        assert_eq!(parse_target("-7"), Some(-7));
        assert_eq!(parse_target("0"), Some(0));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn counter_always_ends_on_exact_target() {
        for target in [1, 7, 49, 50, 99, 150, 333, 1_000, 12_345] {
            let frames = run_to_end(target, 50);
            let last = frames.last().expect("at least one frame");

            assert!(last.finished, "target {target} never finished");
            assert_eq!(last.text, target.to_string());
            assert!(frames.len() <= 51, "target {target} took {} frames", frames.len());
        }
    }

    #[test]
    fn intermediate_frames_are_floored_and_monotonic() {
        let frames = run_to_end(7, 50);
        let values: Vec<i64> = frames
            .iter()
            .map(|frame| frame.text.parse().expect("numeric frame"))
            .collect();

        assert_eq!(values[0], 0);
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(frames[..frames.len() - 1].iter().all(|frame| !frame.finished));
    }
}
