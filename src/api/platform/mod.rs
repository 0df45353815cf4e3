//
//  sysdig-client
//  api/platform/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Platform-wide resources shared by Monitor and Secure.
//!
//! - [`users`] - User accounts
//! - [`teams`] - Teams and e-mail based membership
//! - [`group_mappings`] - SSO group to team role mappings
//! - [`ip_filters`] - Source IP allow-list

pub mod group_mappings;
pub mod ip_filters;
pub mod teams;
pub mod users;

pub use group_mappings::*;
pub use ip_filters::*;
pub use teams::*;
pub use users::*;
