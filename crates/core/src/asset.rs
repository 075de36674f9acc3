//! Boundary to the service that turns a character index into a displayable asset.

use crate::board::CharacterIndex;

pub trait AssetResolver {
    fn resolve(&self, character: CharacterIndex) -> String;
}

/// Avatar URLs from the public DiceBear "avataaars" collection. The same index
/// always maps to the same avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarService {
    pub base_url: String,
    pub background_colors: Vec<String>,
}

impl Default for AvatarService {
    fn default() -> Self {
        Self {
            base_url: "https://api.dicebear.com/7.x/avataaars/svg".to_string(),
            background_colors: ["b6e3f4", "c0aede", "d1d4f9", "ffd5dc", "ffdfbf"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl AssetResolver for AvatarService {
    fn resolve(&self, character: CharacterIndex) -> String {
        format!(
            "{}?seed=character{}&backgroundColor={}",
            self.base_url,
            character.0,
            self.background_colors.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_builds_avataaars_url() {
        let url = AvatarService::default().resolve(CharacterIndex(980_285));
        assert_eq!(
            url,
            "https://api.dicebear.com/7.x/avataaars/svg?seed=character980285\
             &backgroundColor=b6e3f4,c0aede,d1d4f9,ffd5dc,ffdfbf"
        );
    }
}
