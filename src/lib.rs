#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use bw_cfg as cfg;
pub use bw_utils as utils;
pub use bw_wire as wire;
