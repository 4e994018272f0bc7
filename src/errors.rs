/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{error::Error, fmt::Display};

///Encoding/serialization errors
#[derive(Debug, Clone)]
pub enum SerializationError {
    ///Failure to serialize.
    EncodingError,
    ///Failure to deserialize.
    DecodingError,

} impl Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::EncodingError => "Encoding error.",
            Self::DecodingError => "Decoding error."
        })
    }

} impl Error for SerializationError {}

///Ring signature errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    ///The signature does not satisfy the challenge-sum identity.
    Invalid,
    ///The parameters are inconsistent: an empty ring, a signer index past the
    ///last column, a secret count that does not match the rows, or signature
    ///dimensions that do not match the ring.
    Malformed,

} impl Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::Invalid => "This signature is invalid.",
            Self::Malformed => "Malformed signature or parameters.",
        })
    }

} impl Error for SignatureError {}

///Rangeproof errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeProofError {
    ///The rangeproof is invalid.
    Invalid,
    ///The given rangeproof is malformed in some way,
    ///or the parameters are incorrect/inconsistent.
    Malformed,

} impl Display for RangeProofError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::Invalid => "This rangeproof is invalid.",
            Self::Malformed => "Malformed proof or parameters.",
        })
    }

} impl Error for RangeProofError {}
