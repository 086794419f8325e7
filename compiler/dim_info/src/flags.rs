//! Debug-info attribute flags.
//!
//! One flag word is stored per type, subprogram and variable node (slot 8 for
//! types, 13 for subprograms, 6 for variables). Bits are independent.

use bitflags::bitflags;

bitflags! {
    /// Attribute bits carried by type, subprogram and variable nodes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DebugFlags: u32 {
        /// `private` access.
        const PRIVATE = 1 << 0;
        /// `protected` access.
        const PROTECTED = 1 << 1;
        /// Declaration only; the definition lives elsewhere.
        const FWD_DECL = 1 << 2;
        /// Apple Blocks extension.
        const APPLE_BLOCK = 1 << 3;
        /// `__block` byref struct.
        const BLOCK_BYREF_STRUCT = 1 << 4;
        /// Virtual member / virtual base.
        const VIRTUAL = 1 << 5;
        /// Compiler-generated.
        const ARTIFICIAL = 1 << 6;
        /// `explicit` constructor or conversion.
        const EXPLICIT = 1 << 7;
        /// Prototyped function.
        const PROTOTYPED = 1 << 8;
        /// Objective-C class with a complete definition.
        const OBJC_CLASS_COMPLETE = 1 << 9;
        /// `this`/`self` pointer.
        const OBJECT_POINTER = 1 << 10;
        /// SIMD vector.
        const VECTOR = 1 << 11;
        /// Static data member.
        const STATIC_MEMBER = 1 << 12;
        /// Variable described through a pointer.
        const INDIRECT_VARIABLE = 1 << 13;
    }
}

impl DebugFlags {
    /// Decode a flag word read from a node slot.
    ///
    /// Unknown bits are dropped.
    #[inline]
    pub const fn from_word(word: u64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "flag words only use the low 14 bits"
        )]
        let low = word as u32;
        Self::from_bits_truncate(low)
    }

    /// Encode as a slot word.
    #[inline]
    pub const fn word(self) -> u64 {
        self.bits() as u64
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    pub const fn is_protected(self) -> bool {
        self.contains(Self::PROTECTED)
    }

    #[inline]
    pub const fn is_forward_decl(self) -> bool {
        self.contains(Self::FWD_DECL)
    }

    #[inline]
    pub const fn is_apple_block_extension(self) -> bool {
        self.contains(Self::APPLE_BLOCK)
    }

    #[inline]
    pub const fn is_block_byref_struct(self) -> bool {
        self.contains(Self::BLOCK_BYREF_STRUCT)
    }

    #[inline]
    pub const fn is_virtual(self) -> bool {
        self.contains(Self::VIRTUAL)
    }

    #[inline]
    pub const fn is_artificial(self) -> bool {
        self.contains(Self::ARTIFICIAL)
    }

    #[inline]
    pub const fn is_explicit(self) -> bool {
        self.contains(Self::EXPLICIT)
    }

    #[inline]
    pub const fn is_prototyped(self) -> bool {
        self.contains(Self::PROTOTYPED)
    }

    #[inline]
    pub const fn is_objc_class_complete(self) -> bool {
        self.contains(Self::OBJC_CLASS_COMPLETE)
    }

    #[inline]
    pub const fn is_object_pointer(self) -> bool {
        self.contains(Self::OBJECT_POINTER)
    }

    #[inline]
    pub const fn is_vector(self) -> bool {
        self.contains(Self::VECTOR)
    }

    #[inline]
    pub const fn is_static_member(self) -> bool {
        self.contains(Self::STATIC_MEMBER)
    }

    #[inline]
    pub const fn is_indirect_variable(self) -> bool {
        self.contains(Self::INDIRECT_VARIABLE)
    }
}
