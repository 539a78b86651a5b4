//! NSPasteboard-backed source.
//!
//! Every namespace maps to a named system pasteboard. All Objective-C calls
//! run inside an autorelease pool; nothing returned by AppKit here is owned
//! by us, so nothing is released manually.

use std::ffi::CStr;
use std::os::raw::c_char;

use anyhow::Result;
use cocoa::base::{id, nil};
use cocoa::foundation::{NSAutoreleasePool, NSInteger, NSString, NSUInteger};
use objc::rc::autoreleasepool;
use objc::{class, msg_send, sel, sel_impl};
use pv_core::ports::{PasteboardError, PasteboardSourcePort};
use pv_core::{ChangeCounter, Namespace, TypeIdentifier};
use tracing::{debug_span, trace};

/// macOS pasteboard implementation using AppKit.
#[derive(Debug, Default)]
pub struct MacOsPasteboard;

impl MacOsPasteboard {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

/// Values of the `NSPasteboardName*` constants.
fn pasteboard_name(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::General => "Apple CFPasteboard general",
        Namespace::Find => "Apple CFPasteboard find",
        Namespace::Font => "Apple CFPasteboard font",
        Namespace::Ruler => "Apple CFPasteboard ruler",
        Namespace::Drag => "Apple CFPasteboard drag",
    }
}

/// Caller must be inside an autorelease pool.
unsafe fn ns_string(value: &str) -> id {
    NSString::alloc(nil).init_str(value).autorelease()
}

/// Caller must be inside an autorelease pool and `value` must be an
/// NSString or nil.
unsafe fn rust_string(value: id) -> Option<String> {
    if value == nil {
        return None;
    }
    let ptr: *const c_char = NSString::UTF8String(value);
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// Caller must be inside an autorelease pool.
unsafe fn named_pasteboard(namespace: Namespace) -> Result<id, PasteboardError> {
    let name = ns_string(pasteboard_name(namespace));
    let pasteboard: id = msg_send![class!(NSPasteboard), pasteboardWithName: name];
    if pasteboard == nil {
        return Err(PasteboardError::Backend(format!(
            "NSPasteboard {} is unavailable",
            pasteboard_name(namespace)
        )));
    }
    Ok(pasteboard)
}

impl PasteboardSourcePort for MacOsPasteboard {
    fn list_types(&self, namespace: Namespace) -> Result<Vec<TypeIdentifier>, PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = named_pasteboard(namespace)?;
            let types: id = msg_send![pasteboard, types];
            if types == nil {
                return Ok(Vec::new());
            }

            let count: NSUInteger = msg_send![types, count];
            let mut ids = Vec::with_capacity(count as usize);
            for index in 0..count {
                let item: id = msg_send![types, objectAtIndex: index];
                if let Some(value) = rust_string(item) {
                    ids.push(TypeIdentifier::from(value));
                }
            }

            trace!(namespace = %namespace, count = ids.len(), "Enumerated pasteboard types");
            Ok(ids)
        })
    }

    fn change_counter(&self, namespace: Namespace) -> Result<ChangeCounter, PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = named_pasteboard(namespace)?;
            let count: NSInteger = msg_send![pasteboard, changeCount];
            Ok(ChangeCounter(count as i64))
        })
    }

    fn read_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<Vec<u8>, PasteboardError> {
        let span = debug_span!(
            "platform.macos.read_data",
            namespace = %namespace,
            type_id = %type_id
        );
        span.in_scope(|| {
            autoreleasepool(|| unsafe {
                let pasteboard = named_pasteboard(namespace)?;
                let data: id = msg_send![pasteboard, dataForType: ns_string(type_id.as_str())];
                // nil means the representation is gone: another process
                // replaced the pasteboard after we enumerated it.
                if data == nil {
                    return Err(PasteboardError::NotAvailable {
                        namespace,
                        type_id: type_id.clone(),
                    });
                }

                let length: NSUInteger = msg_send![data, length];
                if length == 0 {
                    return Ok(Vec::new());
                }
                let bytes: *const u8 = msg_send![data, bytes];
                if bytes.is_null() {
                    return Ok(Vec::new());
                }
                Ok(std::slice::from_raw_parts(bytes, length as usize).to_vec())
            })
        })
    }
}
