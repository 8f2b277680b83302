use scenegen_scene::Scene;

/// Outcome of the lighting stage of bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingStatus {
    Applied { lights: usize },
    /// No lighting rig exists yet. The scene is left without lights.
    NotYetImplemented,
}

/// Hook that populates the scene with lights during bootstrap.
pub trait LightingSetup {
    fn setup(&self, scene: &mut Scene) -> LightingStatus;
}

impl<F> LightingSetup for F
where
    F: Fn(&mut Scene) -> LightingStatus,
{
    fn setup(&self, scene: &mut Scene) -> LightingStatus {
        self(scene)
    }
}

/// Default lighting stage: adds nothing and says so.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingLighting;

impl LightingSetup for PendingLighting {
    fn setup(&self, _scene: &mut Scene) -> LightingStatus {
        LightingStatus::NotYetImplemented
    }
}
