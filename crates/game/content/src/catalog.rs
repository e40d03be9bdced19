//! In-memory registry of validated dice templates.

use std::collections::BTreeMap;
use std::sync::Arc;

use dice_core::{DiceTemplate, ErrorSeverity, GameError, PassiveKind, Rarity, TemplateError};

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("template `{0}` is defined more than once")]
    DuplicateId(String),

    #[error(transparent)]
    Invalid(#[from] TemplateError),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "CATALOG_DUPLICATE_ID",
            Self::Invalid(e) => e.error_code(),
        }
    }
}

/// Validated templates keyed by id.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Arc<DiceTemplate>>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting invalid and duplicate templates.
    pub fn from_templates(
        templates: impl IntoIterator<Item = DiceTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for template in templates {
            catalog.insert(template)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, template: DiceTemplate) -> Result<Arc<DiceTemplate>, CatalogError> {
        template.validate()?;
        if self.templates.contains_key(&template.id) {
            return Err(CatalogError::DuplicateId(template.id));
        }
        let template = Arc::new(template);
        self.templates
            .insert(template.id.clone(), Arc::clone(&template));
        Ok(template)
    }

    pub fn get(&self, id: &str) -> Option<Arc<DiceTemplate>> {
        self.templates.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DiceTemplate>> + '_ {
        self.templates.values()
    }

    /// Templates that can shoot, in id order.
    pub fn attackers(&self) -> impl Iterator<Item = &Arc<DiceTemplate>> + '_ {
        self.iter().filter(|t| t.can_attack)
    }

    pub fn by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Arc<DiceTemplate>> + '_ {
        self.iter().filter(move |t| t.rarity == rarity)
    }

    /// First template carrying a passive named `name` (snake_case).
    pub fn with_passive_named(&self, name: &str) -> Option<Arc<DiceTemplate>> {
        self.iter()
            .find(|t| t.passive.as_ref().map(PassiveKind::name) == Some(name))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates_and_invalid_templates() {
        let mut catalog = TemplateCatalog::new();
        catalog.insert(DiceTemplate::new("d6", 6, 1.0, 1.0)).unwrap();

        assert_eq!(
            catalog.insert(DiceTemplate::new("d6", 8, 1.0, 1.0)),
            Err(CatalogError::DuplicateId("d6".into()))
        );
        let err = catalog
            .insert(DiceTemplate::new("broken", 6, 1.0, 0.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "TEMPLATE_FIRE_INTERVAL");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn lookups_share_one_allocation() {
        let catalog = TemplateCatalog::from_templates([
            DiceTemplate::new("a", 4, 1.0, 1.0),
            DiceTemplate::new("b", 6, 1.0, 1.0).support_only(),
        ])
        .unwrap();

        let first = catalog.get("a").unwrap();
        let second = catalog.get("a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(catalog.attackers().count(), 1);
        assert!(catalog.get("missing").is_none());
    }
}
