// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use rand::rngs::OsRng;
use rand::RngCore;

/// Length of a generated id in hex characters.
pub const ID_LENGTH: usize = 32;

pub trait IdGenerator: Send + Sync {
	fn generate(&self) -> String;
}

/// 128 bits from the operating system RNG, lowercase hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
	fn generate(&self) -> String {
		let mut bytes = [0u8; ID_LENGTH / 2];
		OsRng.fill_bytes(&mut bytes);
		hex::encode(bytes)
	}
}
