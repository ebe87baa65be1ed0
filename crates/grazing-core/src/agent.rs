use crate::grazer::Grazer;
use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Generational handle for any agent registered with the world.
    pub struct AgentId;
}

/// Discriminant used by reporting filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Grazer,
    Patch,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Agent {
    Grazer(Grazer),
    Patch(Patch),
}

impl Agent {
    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Grazer(_) => AgentKind::Grazer,
            Agent::Patch(_) => AgentKind::Patch,
        }
    }

    pub fn as_grazer(&self) -> Option<&Grazer> {
        match self {
            Agent::Grazer(g) => Some(g),
            Agent::Patch(_) => None,
        }
    }

    pub fn as_grazer_mut(&mut self) -> Option<&mut Grazer> {
        match self {
            Agent::Grazer(g) => Some(g),
            Agent::Patch(_) => None,
        }
    }

    pub fn as_patch(&self) -> Option<&Patch> {
        match self {
            Agent::Patch(p) => Some(p),
            Agent::Grazer(_) => None,
        }
    }

    pub fn as_patch_mut(&mut self) -> Option<&mut Patch> {
        match self {
            Agent::Patch(p) => Some(p),
            Agent::Grazer(_) => None,
        }
    }
}

impl From<Grazer> for Agent {
    fn from(grazer: Grazer) -> Self {
        Agent::Grazer(grazer)
    }
}

impl From<Patch> for Agent {
    fn from(patch: Patch) -> Self {
        Agent::Patch(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_variant() {
        let grazer = Agent::from(Grazer::adult(10.0));
        assert_eq!(grazer.kind(), AgentKind::Grazer);
        assert!(grazer.as_grazer().is_some());
        assert!(grazer.as_patch().is_none());

        let patch = Agent::from(Patch::pre_grown(731));
        assert_eq!(patch.kind(), AgentKind::Patch);
        assert!(patch.as_patch().is_some());
        assert!(patch.as_grazer().is_none());
    }
}
