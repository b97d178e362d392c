use crate::jvm::FieldAccessFlags;
use std::collections::HashMap;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::sync::OnceLock;

/// Modifier bits that rules can switch on and off independently of visibility
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Modifier {
    Final,
}

impl Modifier {
    pub const ALL: [Modifier; 1] = [Modifier::Final];

    /// Short name used in rule text (eg. the `f` in `public-f`)
    pub const fn name(self) -> &'static str {
        match self {
            Modifier::Final => "f",
        }
    }

    /// Bit in the access flags of a class file
    pub const fn flag(self) -> u16 {
        match self {
            Modifier::Final => FieldAccessFlags::FINAL.bits(),
        }
    }

    pub fn by_name(name: &str) -> Option<Modifier> {
        registry().by_name.get(name).copied()
    }

    pub fn by_flag(flag: u16) -> Option<Modifier> {
        registry().by_flag.get(&flag).copied()
    }
}

struct Registry {
    by_name: HashMap<&'static str, Modifier>,
    by_flag: HashMap<u16, Modifier>,
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry {
        by_name: Modifier::ALL.iter().map(|m| (m.name(), *m)).collect(),
        by_flag: Modifier::ALL.iter().map(|m| (m.flag(), *m)).collect(),
    })
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ToggleAction {
    Add,
    Remove,
}

/// Set or clear one modifier bit
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ModifierToggle {
    pub action: ToggleAction,
    pub modifier: Modifier,
}

impl ModifierToggle {
    pub const fn add(modifier: Modifier) -> ModifierToggle {
        ModifierToggle {
            action: ToggleAction::Add,
            modifier,
        }
    }

    pub const fn remove(modifier: Modifier) -> ModifierToggle {
        ModifierToggle {
            action: ToggleAction::Remove,
            modifier,
        }
    }

    pub fn is_remove(&self) -> bool {
        self.action == ToggleAction::Remove
    }

    /// Apply the toggle to some access flags
    pub fn apply(&self, flags: u16) -> u16 {
        match self.action {
            ToggleAction::Add => flags | self.modifier.flag(),
            ToggleAction::Remove => flags & !self.modifier.flag(),
        }
    }
}

impl Display for ModifierToggle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        let sign = match self.action {
            ToggleAction::Add => '+',
            ToggleAction::Remove => '-',
        };
        write!(f, "{}{}", sign, self.modifier.name())
    }
}
