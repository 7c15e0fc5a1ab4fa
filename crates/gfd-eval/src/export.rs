//! The renderer contract.
//!
//! A finished run exports every bound object (in binding order) with its
//! kind, numeric fields, display name and provenance, plus every stored
//! relation tuple. The renderer on the other side of this contract is
//! out of scope; the export is plain serializable data.

use crate::evaluator::Evaluation;
use gfd_types::{Relation, Shape};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FigureExport {
    pub objects: Vec<ObjectExport>,
    pub relations: Vec<RelationExport>,
}

#[derive(Debug, Serialize)]
pub struct ObjectExport {
    pub name: String,
    pub kind: String,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ProvenanceExport>,
}

#[derive(Debug, Serialize)]
pub struct ProvenanceExport {
    pub op: String,
    /// Display names of the construction's inputs, in call order.
    pub parents: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RelationExport {
    pub relation: &'static str,
    /// Display names, in canonical tuple order.
    pub members: Vec<String>,
}

impl Evaluation {
    pub fn export(&self) -> FigureExport {
        let arena = &self.figure.arena;
        let objects = self
            .bound_names()
            .filter_map(|name| {
                let id = self.lookup(name)?;
                let obj = arena.get(id);
                Some(ObjectExport {
                    name: name.to_string(),
                    kind: obj.kind().to_string(),
                    shape: obj.shape,
                    provenance: obj.provenance.as_ref().map(|p| ProvenanceExport {
                        op: p.op.clone(),
                        parents: p.parents.iter().map(|&id| arena.name(id).to_string()).collect(),
                    }),
                })
            })
            .collect();
        let mut relations = Vec::new();
        for rel in Relation::ALL {
            for tuple in self.figure.store.tuples(rel) {
                relations.push(RelationExport {
                    relation: rel.name(),
                    members: tuple.iter().map(|&id| arena.name(id).to_string()).collect(),
                });
            }
        }
        FigureExport { objects, relations }
    }
}
