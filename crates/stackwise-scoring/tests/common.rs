#![allow(dead_code)]

use std::collections::VecDeque;

use jiff::civil::date;
use rand::RngCore;
use stackwise_core::models::category::Category;
use stackwise_core::models::feature::FeatureMap;
use stackwise_core::models::product::Product;
use uuid::Uuid;

/// Random source that replays fixed unit draws (`rng.random::<f64>()`).
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let draw = self.draws.pop_front().expect("script ran out of draws");
        // `random::<f64>()` keeps the top 53 bits.
        ((draw * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

pub fn product(name: &str, category: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        name: name.to_string(),
        description: String::new(),
        url: String::new(),
        category: Category::from(category),
        price: 49.0,
        purchase_date: date(2024, 3, 1),
        features: FeatureMap::new(),
        ai_analysis: None,
        tags: None,
        created_at: jiff::Timestamp::UNIX_EPOCH,
    }
}
