//
//  sysdig-client
//  api/monitor/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Sysdig Monitor resources.
//!
//! - [`notification_channels`] - Alert and event delivery targets

pub mod notification_channels;

pub use notification_channels::*;
