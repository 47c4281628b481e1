//! Hand-written prost types matching the archiver's `EPICSEvent.proto` (package `EPICS`).
//!
//! Every proto `string` field is declared as `bytes`: the wire type is the
//! same and the server does not guarantee UTF-8 (headers may carry Latin-1).
//! The schema is proto2, so numeric arrays are written unpacked.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldValue {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", required, tag = "2")]
    pub val: ::prost::alloc::vec::Vec<u8>,
}

/// Stream header preceding a run of samples.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadInfo {
    #[prost(int32, required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub pvname: ::prost::alloc::vec::Vec<u8>,
    #[prost(int32, required, tag = "3")]
    pub year: i32,
    #[prost(int32, optional, tag = "4")]
    pub element_count: ::core::option::Option<i32>,
    #[prost(double, optional, tag = "5")]
    pub unused00: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub unused01: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "7")]
    pub unused02: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "8")]
    pub unused03: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "9")]
    pub unused04: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "10")]
    pub unused05: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "11")]
    pub unused06: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "12")]
    pub unused07: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "13")]
    pub unused08: ::core::option::Option<f64>,
    #[prost(bytes = "vec", optional, tag = "14")]
    pub unused09: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, repeated, tag = "15")]
    pub headers: ::prost::alloc::vec::Vec<FieldValue>,
}

/// Declares one sample message. Every sample type shares tags 1, 2 and 4..8;
/// only the `val` field (tag 3) differs.
macro_rules! sample_message {
    ($(#[$doc:meta])* $name:ident, $val_ty:ty, $($val_attr:tt)+) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct $name {
            #[prost(uint32, required, tag = "1")]
            pub secondsintoyear: u32,
            #[prost(uint32, required, tag = "2")]
            pub nano: u32,
            #[prost($($val_attr)+, tag = "3")]
            pub val: $val_ty,
            #[prost(int32, optional, tag = "4")]
            pub severity: ::core::option::Option<i32>,
            #[prost(int32, optional, tag = "5")]
            pub status: ::core::option::Option<i32>,
            #[prost(uint32, optional, tag = "6")]
            pub repeatcount: ::core::option::Option<u32>,
            #[prost(message, repeated, tag = "7")]
            pub fieldvalues: ::prost::alloc::vec::Vec<FieldValue>,
            #[prost(bool, optional, tag = "8")]
            pub fieldactualchange: ::core::option::Option<bool>,
        }
    };
}

sample_message!(ScalarString, ::prost::alloc::vec::Vec<u8>, bytes = "vec", required);
sample_message!(ScalarShort, i32, sint32, required);
sample_message!(ScalarFloat, f32, float, required);
sample_message!(ScalarEnum, i32, sint32, required);
sample_message!(ScalarByte, ::prost::alloc::vec::Vec<u8>, bytes = "vec", required);
sample_message!(ScalarInt, i32, sfixed32, required);
sample_message!(ScalarDouble, f64, double, required);
sample_message!(VectorString, ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>, bytes = "vec", repeated);
sample_message!(VectorShort, ::prost::alloc::vec::Vec<i32>, sint32, repeated, packed = "false");
sample_message!(VectorFloat, ::prost::alloc::vec::Vec<f32>, float, repeated, packed = "false");
sample_message!(VectorEnum, ::prost::alloc::vec::Vec<i32>, sint32, repeated, packed = "false");
sample_message!(VectorChar, ::prost::alloc::vec::Vec<u8>, bytes = "vec", required);
sample_message!(VectorInt, ::prost::alloc::vec::Vec<i32>, sfixed32, repeated, packed = "false");
sample_message!(VectorDouble, ::prost::alloc::vec::Vec<f64>, double, repeated, packed = "false");

/// Opaque pvAccess payload. Same layout as the others plus `userTag`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct V4GenericBytes {
    #[prost(uint32, required, tag = "1")]
    pub secondsintoyear: u32,
    #[prost(uint32, required, tag = "2")]
    pub nano: u32,
    #[prost(bytes = "vec", required, tag = "3")]
    pub val: ::prost::alloc::vec::Vec<u8>,
    #[prost(int32, optional, tag = "4")]
    pub severity: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub status: ::core::option::Option<i32>,
    #[prost(uint32, optional, tag = "6")]
    pub repeatcount: ::core::option::Option<u32>,
    #[prost(message, repeated, tag = "7")]
    pub fieldvalues: ::prost::alloc::vec::Vec<FieldValue>,
    #[prost(bool, optional, tag = "8")]
    pub fieldactualchange: ::core::option::Option<bool>,
    #[prost(uint32, optional, tag = "9")]
    pub user_tag: ::core::option::Option<u32>,
}
