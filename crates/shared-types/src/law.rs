//! Statutory references cited by issues and sections

pub const S29: &str = "Law of Succession Act (Cap. 160), s. 29";
pub const S40: &str = "Law of Succession Act (Cap. 160), s. 40";
pub const S70: &str = "Law of Succession Act (Cap. 160), s. 70";
pub const S72: &str = "Law of Succession Act (Cap. 160), s. 72";
pub const S73: &str = "Law of Succession Act (Cap. 160), s. 73";
pub const S72_S73: &str = "Law of Succession Act (Cap. 160), ss. 72-73";
pub const MARRIAGE_ACT: &str = "Marriage Act, 2014";
pub const CHILDREN_ACT: &str = "Children Act, 2022";
pub const DATA_INTEGRITY: &str = "Family record integrity check";
