//! Identifier minting
//!
//! An instance without an explicit identifier gets one minted per its
//! object type's strategy. Minted identifiers are cached on the instance
//! and recomputed after any field write, which matters only for the
//! content-addressed SHA-256 strategy; the random strategies simply keep
//! their first draw until invalidated.

use crate::error::{CodecError, Result};
use crate::hash::feed_instance;
use crate::value::Instance;
use shapegen_graph_ir::Term;
use shapegen_model::{ObjectModel, ObjectType};
use shapegen_shapes::MintingStrategy;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Mint a fresh identifier for an instance, ignoring any cache
pub fn mint_identifier(
    model: &ObjectModel,
    ty: &ObjectType,
    instance: &Instance,
) -> Result<Term> {
    match ty.minting {
        MintingStrategy::BlankNode => {
            Ok(Term::blank(format!("gen-{}", Uuid::new_v4().simple())))
        }
        MintingStrategy::Uuidv4 => Ok(Term::iri(format!(
            "urn:shapegen:{}:uuid:{}",
            ty.discriminator,
            Uuid::new_v4()
        ))),
        MintingStrategy::Sha256 => {
            let mut hasher = Sha256::new();
            feed_instance(model, ty, instance, &mut hasher)?;
            Ok(Term::iri(format!(
                "urn:shapegen:{}:sha256:{}",
                ty.discriminator,
                hex::encode(hasher.finalize())
            )))
        }
        MintingStrategy::None => Err(CodecError::IdentifierRequired {
            object: ty.name.clone(),
        }),
    }
}

/// The instance's effective identifier: explicit, else cached mint, else
/// a fresh mint stored back on the instance
pub fn identifier_of(
    model: &ObjectModel,
    ty: &ObjectType,
    instance: &mut Instance,
) -> Result<Term> {
    if let Some(id) = instance.explicit_id() {
        return Ok(id.clone());
    }
    if let Some(cached) = instance.minted_cache() {
        return Ok(cached.clone());
    }
    let id = mint_identifier(model, ty, instance)?;
    instance.store_minted(id.clone());
    Ok(id)
}
