//! Read-only access to per-paragraph module hints.

use std::sync::Arc;

use taleplay_core::{ModuleHint, Paragraph};

/// Projects the advisory hints of each paragraph for the render layer.
#[derive(Debug, Clone)]
pub struct HintProjector {
    paragraphs: Arc<[Paragraph]>,
}

impl HintProjector {
    pub const fn new(paragraphs: Arc<[Paragraph]>) -> Self {
        Self { paragraphs }
    }

    /// Hints of paragraph `index`, in provider order.
    ///
    /// Empty when the paragraph has none or `index` is out of range.
    pub fn hints(&self, index: usize) -> &[ModuleHint] {
        self.paragraphs
            .get(index)
            .map(Paragraph::module_hints)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleplay_core::SensoryModule;

    #[test]
    fn returns_hints_in_order() {
        let hinted = Paragraph::new("風吹過來了。").unwrap().with_hints(vec![
            ModuleHint::new(SensoryModule::Wind, "打開風扇"),
            ModuleHint::new(SensoryModule::Vibration, "輕輕震動"),
        ]);
        let plain = Paragraph::new("安靜的夜晚。").unwrap();
        let projector = HintProjector::new(vec![hinted, plain].into());

        let modules: Vec<&SensoryModule> = projector.hints(0).iter().map(|h| &h.module).collect();
        assert_eq!(modules, [&SensoryModule::Wind, &SensoryModule::Vibration]);
        assert!(projector.hints(1).is_empty());
        assert!(projector.hints(2).is_empty());
    }
}
