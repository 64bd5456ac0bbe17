// 🗄️ NEO Database - Linkage + lookup indexes
//
// Owns both collections as arenas and links them by designation:
// - each CloseApproach gets the NeoId of its NEO
// - each NEO gets the ApproachIds of its approaches, in load order
//
// Built once, read-only afterwards. Queries are lazy iterators over borrowed views.

use crate::entities::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};
use crate::error::{ModelError, ModelResult};
use crate::filters::Filter;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,

    /// NEO of each approach, parallel to `approaches`
    links: Vec<NeoId>,

    /// designation → NEO
    by_designation: HashMap<String, NeoId>,

    /// exact (case-sensitive) name → NEO
    by_name: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Build the indexes and link every approach to its NEO
    ///
    /// Fails if two NEOs share a designation or if an approach names a
    /// designation that no NEO has. Links carried in from another database
    /// are discarded and rebuilt.
    pub fn new(
        mut neos: Vec<NearEarthObject>,
        mut approaches: Vec<CloseApproach>,
    ) -> ModelResult<Self> {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();

        for (index, neo) in neos.iter_mut().enumerate() {
            let id = NeoId(index);
            neo.clear_approaches();

            if by_designation.insert(neo.designation.clone(), id).is_some() {
                return Err(ModelError::DuplicateDesignation(neo.designation.clone()));
            }

            if let Some(name) = &neo.name {
                if by_name.contains_key(name) {
                    warn!(name = %name, designation = %neo.designation, "duplicate NEO name, keeping first");
                } else {
                    by_name.insert(name.clone(), id);
                }
            }
        }

        let mut links = Vec::with_capacity(approaches.len());

        for (index, approach) in approaches.iter_mut().enumerate() {
            let id = *by_designation
                .get(approach.designation())
                .ok_or_else(|| ModelError::UnknownDesignation(approach.designation().to_string()))?;

            approach.unlink();
            approach.link(id);
            neos[id.0].add_approach(ApproachId(index));
            links.push(id);
        }

        info!(
            neos = neos.len(),
            approaches = approaches.len(),
            named = by_name.len(),
            "linked NEO database"
        );

        Ok(NeoDatabase {
            neos,
            approaches,
            links,
            by_designation,
            by_name,
        })
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// Find a NEO by its primary designation
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation.trim())
            .map(|id| &self.neos[id.0])
    }

    /// Find a NEO by its IAU name (exact, case-sensitive match)
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name.trim()).map(|id| &self.neos[id.0])
    }

    pub fn get_neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    pub fn get_approach(&self, id: ApproachId) -> Option<LinkedApproach<'_>> {
        self.approaches
            .get(id.0)
            .and_then(|approach| self.resolve(approach).ok())
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All approaches, in load order
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Pair an approach with its NEO
    ///
    /// Fails for approaches that were never linked into this database.
    pub fn resolve<'a>(&'a self, approach: &'a CloseApproach) -> ModelResult<LinkedApproach<'a>> {
        let unlinked = || ModelError::Unlinked(approach.designation().to_string());

        let id = approach.neo_id().ok_or_else(unlinked)?;
        let neo = self
            .neos
            .get(id.0)
            .filter(|neo| neo.designation == approach.designation())
            .ok_or_else(unlinked)?;

        Ok(LinkedApproach::new(approach, neo))
    }

    /// Approaches of one NEO, in load order
    pub fn approaches_for<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        neo.approach_ids()
            .iter()
            .filter_map(move |id| self.approaches.get(id.0))
            .map(move |approach| LinkedApproach::new(approach, neo))
    }

    // ========================================================================
    // QUERY
    // ========================================================================

    /// Every approach paired with its NEO, in load order
    pub fn linked_approaches(&self) -> impl Iterator<Item = LinkedApproach<'_>> + '_ {
        self.approaches
            .iter()
            .zip(&self.links)
            .map(move |(approach, id)| LinkedApproach::new(approach, &self.neos[id.0]))
    }

    /// Lazily yield approaches (load order) that satisfy every filter
    ///
    /// An empty filter list matches everything.
    pub fn query<'a>(
        &'a self,
        filters: &'a [Filter],
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        debug!(filters = filters.len(), "querying close approaches");

        self.linked_approaches()
            .filter(move |linked| filters.iter().all(|filter| filter.matches(linked)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
