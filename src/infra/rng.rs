use std::collections::VecDeque;

use rand::Rng;

use crate::domain::{Pocket, POCKET_COUNT};
use crate::engine::SpinSource;

fn draw_pocket<G: Rng + ?Sized>(rng: &mut G) -> Pocket {
    let n = rng.gen_range(0..POCKET_COUNT);
    // gen_range уже держит нас в 0..37
    Pocket::new(n).unwrap_or(Pocket::ZERO)
}

/// Системный RNG (thread_rng).
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl SpinSource for SystemRng {
    fn spin(&mut self) -> Pocket {
        draw_pocket(&mut rand::thread_rng())
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковую последовательность номеров.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl SpinSource for DeterministicRng {
    fn spin(&mut self) -> Pocket {
        draw_pocket(&mut self.inner)
    }
}

/// Всегда выпадает один и тот же номер.
#[derive(Clone, Copy, Debug)]
pub struct FixedOutcome(pub Pocket);

impl SpinSource for FixedOutcome {
    fn spin(&mut self) -> Pocket {
        self.0
    }
}

/// Заранее заданная очередь номеров, по кругу.
#[derive(Clone, Debug)]
pub struct ScriptedOutcomes {
    script: VecDeque<Pocket>,
}

impl ScriptedOutcomes {
    /// Пустой сценарий всегда даёт 0.
    pub fn new<I: IntoIterator<Item = Pocket>>(outcomes: I) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
        }
    }
}

impl SpinSource for ScriptedOutcomes {
    fn spin(&mut self) -> Pocket {
        match self.script.pop_front() {
            Some(p) => {
                self.script.push_back(p);
                p
            }
            None => Pocket::ZERO,
        }
    }
}
