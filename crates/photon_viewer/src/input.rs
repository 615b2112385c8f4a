//! Input sources polled once per frame.

use std::collections::VecDeque;

use crate::observer::Key;

/// Anything that can deliver observer commands.
pub trait InputSource {
    /// Next pending command, if any.
    fn poll(&mut self) -> Option<Key>;
}

/// Replays a fixed key sequence, one key per poll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Parse a key script such as `"wwqqd"`. Whitespace is ignored; other
    /// unknown characters are skipped with a warning.
    pub fn parse(script: &str) -> Self {
        let keys = script
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| {
                let key = Key::from_char(c);
                if key.is_none() {
                    log::warn!("Ignoring unknown key {:?} in script", c);
                }
                key
            });
        Self::new(keys)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }
}
