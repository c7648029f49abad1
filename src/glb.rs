use std::borrow::Cow;

use gltf::binary::{Glb, Header};

use crate::error::{MigrationError, Result};

/// The two chunks of a GLB container. The binary chunk is carried verbatim
/// through the migration and never interpreted.
#[derive(Debug, Clone)]
pub struct Container {
    pub json: Vec<u8>,
    pub binary: Option<Vec<u8>>,
}

/// Split a GLB byte stream into its JSON and binary chunks.
pub fn parse(bytes: &[u8]) -> Result<Container> {
    let glb = Glb::from_slice(bytes)
        .map_err(|err| MigrationError::MalformedContainer(err.to_string()))?;

    Ok(Container {
        json: glb.json.into_owned(),
        binary: glb.bin.map(Cow::into_owned),
    })
}

/// Reassemble a GLB container from a JSON chunk and an optional binary
/// chunk. Chunk alignment padding (spaces for JSON, zeros for binary) is
/// applied by the writer; the binary payload itself is untouched.
pub fn assemble(json: &[u8], binary: Option<&[u8]>) -> Result<Vec<u8>> {
    let glb = Glb {
        // to_writer recomputes the total length field.
        header: Header {
            magic: *b"glTF",
            version: 2,
            length: 0,
        },
        json: Cow::Borrowed(json),
        bin: binary.map(Cow::Borrowed),
    };

    let mut out = Vec::new();
    glb.to_writer(&mut out)
        .map_err(|err| MigrationError::MalformedContainer(err.to_string()))?;
    Ok(out)
}
