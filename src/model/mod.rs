//! Data model: the requisition entity tree and outbound event documents.

pub mod event;
pub mod requisition;

pub use event::{Event, EventParameter, Severity};
pub use requisition::{
    Asset, Category, Interface, MetaData, MonitoredService, Node, Requisition, RequisitionStats,
    RequisitionsList, RequisitionsStats,
};
