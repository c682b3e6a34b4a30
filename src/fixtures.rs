use std::path::{Path, PathBuf};

use rand::Rng;

/// Demo files known to contain a gap.
pub const POSITIVE: &[&str] = &["gap_768.wav", "gap_20.wav"];
/// Clean demo files, including passages of near silence.
pub const NEGATIVE: &[&str] = &["clean_1.wav", "clean_2.wav"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub path: PathBuf,
    pub positive: bool,
}

/// Pick one labelled fixture for the no-input demo mode. The RNG is created
/// by the caller at startup and passed in; nothing here holds process state.
pub fn pick(dir: &Path, rng: &mut impl Rng) -> Fixture {
    let positive = rng.gen_bool(0.5);
    let names = if positive { POSITIVE } else { NEGATIVE };
    let name = names[rng.gen_range(0..names.len())];
    Fixture {
        path: dir.join(name),
        positive,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn picked_fixture_lives_under_the_dir_with_a_known_label() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let fixture = pick(Path::new("test/audio"), &mut rng);
            let name = fixture.path.file_name().unwrap().to_str().unwrap();
            let list = if fixture.positive { POSITIVE } else { NEGATIVE };
            assert!(list.contains(&name));
            assert!(fixture.path.starts_with("test/audio"));
        }
    }

    #[test]
    fn both_labels_come_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let picks: Vec<bool> = (0..64).map(|_| pick(Path::new("x"), &mut rng).positive).collect();
        assert!(picks.iter().any(|p| *p));
        assert!(picks.iter().any(|p| !*p));
    }
}
