// FICHIER : src-core/src/backend/query.rs

use crate::utils::VitrineResult;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Requête REST sur une ressource : chemin + paramètres
/// `filters[a][b][$eq]=v`, `populate=*`, `sort=champ:asc|desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    path: String,
    params: Vec<(String, String)>,
}

impl ResourceQuery {
    pub fn new(resource: &str) -> Self {
        Self {
            path: resource.trim_matches('/').to_string(),
            params: Vec::new(),
        }
    }

    /// `collections/7`
    pub fn entry(resource: &str, id: u64) -> Self {
        Self::new(&format!("{}/{}", resource.trim_matches('/'), id))
    }

    /// Égalité sur un chemin de relation : `["collection", "id"]` -> `filters[collection][id][$eq]`.
    pub fn filter_eq(mut self, path: &[&str], value: impl ToString) -> Self {
        let key = path
            .iter()
            .fold(String::from("filters"), |acc, seg| format!("{}[{}]", acc, seg));
        self.params.push((format!("{}[$eq]", key), value.to_string()));
        self
    }

    pub fn populate_all(self) -> Self {
        self.populate("*")
    }

    pub fn populate(mut self, relation: &str) -> Self {
        self.params.push(("populate".into(), relation.into()));
        self
    }

    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.params.push(("sort".into(), format!("{}:{}", field, order)));
        self
    }

    /// Paramètre libre (pagination du service de tickets, etc.).
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// URL complète sous la racine de l'API (le chemin de la racine est conservé).
    pub fn to_url(&self, api_base: &str) -> VitrineResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", api_base.trim_end_matches('/'), self.path))?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// Forme lisible (non encodée), utilisée dans les logs et les messages d'erreur.
impl fmt::Display for ResourceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            write!(f, "{}{}={}", if i == 0 { '?' } else { '&' }, k, v)?;
        }
        Ok(())
    }
}
