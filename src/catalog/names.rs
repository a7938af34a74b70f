//! Name pool drawn without replacement

use rand::Rng;

/// Pool of names handed out without replacement
///
/// While unused names remain, no name is returned twice. Once the pool is
/// exhausted, names are drawn uniformly from the full list again.
#[derive(Debug, Clone)]
pub struct NamePool {
    all: Vec<String>,
    remaining: Vec<String>,
}

impl NamePool {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            remaining: names.clone(),
            all: names,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if !self.remaining.is_empty() {
            let index = rng.gen_range(0..self.remaining.len());
            return Some(self.remaining.swap_remove(index));
        }
        if self.all.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.all.len());
        Some(self.all[index].clone())
    }
}
