use super::IHealthTipRepo;
use crate::repos::shared::inmemory_repo::*;
use health_companion_domain::{HealthTip, ID};
use rand::seq::SliceRandom;

pub struct InMemoryHealthTipRepo {
    tips: std::sync::Mutex<Vec<HealthTip>>,
}

impl InMemoryHealthTipRepo {
    pub fn new() -> Self {
        Self {
            tips: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IHealthTipRepo for InMemoryHealthTipRepo {
    async fn insert(&self, tip: &HealthTip) -> anyhow::Result<()> {
        insert(tip, &self.tips);
        Ok(())
    }

    async fn save(&self, tip: &HealthTip) -> anyhow::Result<()> {
        save(tip, &self.tips);
        Ok(())
    }

    async fn delete(&self, tip_id: &ID) -> Option<HealthTip> {
        delete(tip_id, &self.tips)
    }

    async fn find(&self, tip_id: &ID) -> Option<HealthTip> {
        find(tip_id, &self.tips)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<HealthTip>> {
        Ok(find_by(&self.tips, |_| true))
    }

    async fn find_random(&self) -> Option<HealthTip> {
        let tips = self.tips.lock().unwrap();
        tips.choose(&mut rand::thread_rng()).cloned()
    }
}
