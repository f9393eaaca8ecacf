//! Taxa fixtures shaped like real autocomplete/detail responses.

use super::FakeApi;
use nearme_core::types::{Taxon, TaxonSummary};

pub const SCREECH_OWL: u64 = 144_757;
pub const STRIGIDAE: u64 = 19_350;

fn summary(id: u64, name: &str, common: Option<&str>) -> TaxonSummary {
    TaxonSummary { id, name: name.into(), preferred_common_name: common.map(Into::into) }
}

pub fn owl_suggestions() -> Vec<TaxonSummary> {
    vec![
        summary(STRIGIDAE, "Strigidae", Some("Typical Owls")),
        summary(SCREECH_OWL, "Megascops asio", Some("Eastern Screech Owl")),
        summary(20_413, "Tyto alba", Some("Barn Owl")),
    ]
}

pub fn screech_owl() -> Taxon {
    Taxon {
        id: SCREECH_OWL,
        name: "Megascops asio".into(),
        preferred_common_name: Some("Eastern Screech Owl".into()),
        ancestors: vec![
            summary(48_460, "Life", None),
            summary(1, "Animalia", Some("Animals")),
            summary(3, "Aves", Some("Birds")),
            summary(STRIGIDAE, "Strigidae", Some("Typical Owls")),
        ],
    }
}

pub fn strigidae() -> Taxon {
    Taxon {
        id: STRIGIDAE,
        name: "Strigidae".into(),
        preferred_common_name: Some("Typical Owls".into()),
        ancestors: vec![summary(48_460, "Life", None), summary(3, "Aves", Some("Birds"))],
    }
}

pub fn owl_api() -> FakeApi {
    let mut api = FakeApi::default();
    api.suggestions.insert("owl".into(), owl_suggestions());
    api.taxa.insert(SCREECH_OWL, screech_owl());
    api.taxa.insert(STRIGIDAE, strigidae());
    api
}
