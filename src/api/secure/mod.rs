//
//  sysdig-client
//  api/secure/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Sysdig Secure resources.
//!
//! - [`rules`] - Runtime rules and rule groups
//! - [`policies`] - Runtime policies, alone or together with their rules
//! - [`posture_zones`] - CSPM posture zones

pub mod policies;
pub mod posture_zones;
pub mod rules;

pub use policies::*;
pub use posture_zones::*;
pub use rules::*;
