use super::{Catalog, Mapping};
use crate::{Error, Result};

use std::collections::HashSet;

impl Mapping {
    pub(super) fn verify(&self) -> Result<()> {
        let model = self.model.name();

        if self.primary_key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "`{model}` has no primary key"
            )));
        }

        let mut names = HashSet::new();
        let mut fields = HashSet::new();

        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "`{model}` maps column `{}` more than once",
                    column.name
                )));
            }

            if !fields.insert(column.field.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "`{model}` maps field `{}` more than once",
                    column.field
                )));
            }
        }

        for relation in &self.relations {
            if !fields.insert(relation.field.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "`{model}` maps field `{}` more than once",
                    relation.field
                )));
            }

            if relation.join_pairs.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "relation `{}` on `{model}` has no join columns",
                    relation.field
                )));
            }

            for pair in &relation.join_pairs {
                if self.column(&pair.local).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}` on `{model}` joins on unmapped column `{}`",
                        relation.field, pair.local
                    )));
                }
            }
        }

        let keys = std::iter::once(&self.primary_key).chain(&self.unique_keys);
        for key in keys {
            for name in key {
                if self.column(name).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "key column `{name}` is not mapped on `{model}`"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Catalog {
    /// Checks relations against the mappings of their targets. A target that
    /// is not registered is reported when a query traverses it.
    pub(super) fn verify(&self) -> Result<()> {
        for mapping in self.mappings() {
            for relation in &mapping.relations {
                let Some(target) = self.mapping(relation.target) else {
                    continue;
                };

                if target.table != relation.target_table {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}` on `{}` targets table `{}`, but `{}` is mapped to `{}`",
                        relation.field,
                        mapping.model.name(),
                        relation.target_table,
                        target.model.name(),
                        target.table
                    )));
                }

                for pair in &relation.join_pairs {
                    if target.column(&pair.remote).is_none() {
                        return Err(Error::invalid_schema(format!(
                            "relation `{}` on `{}` joins on unmapped column `{}.{}`",
                            relation.field,
                            mapping.model.name(),
                            target.table,
                            pair.remote
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
