//! The C type record (spec.md §3): `{ base_name, is_const, is_pointer,
//! pointer_level, is_array, array_size, element_type, is_static,
//! is_extern }`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub base_name: String,
    pub is_const: bool,
    pub is_pointer: bool,
    pub pointer_level: u8,
    pub is_array: bool,
    pub array_size: Option<u32>,
    /// For a pointer or array type, the type of the thing pointed to /
    /// contained. A 2D `[10][16]` array is modeled as
    /// `Type { is_array: true, array_size: Some(10), element_type: Some(Type {
    /// is_array: true, array_size: Some(16), element_type: Some(elem) }) }`.
    pub element_type: Option<Box<Type>>,
    pub is_static: bool,
    pub is_extern: bool,
}

impl Type {
    fn scalar(base_name: &str) -> Type {
        Type {
            base_name: base_name.to_string(),
            is_const: false,
            is_pointer: false,
            pointer_level: 0,
            is_array: false,
            array_size: None,
            element_type: None,
            is_static: false,
            is_extern: false,
        }
    }

    pub fn void() -> Type {
        Type::scalar("void")
    }
    pub fn bool_() -> Type {
        Type::scalar("bool")
    }
    pub fn char_() -> Type {
        Type::scalar("char")
    }
    pub fn size_t() -> Type {
        Type::scalar("size_t")
    }
    pub fn float_() -> Type {
        Type::scalar("float")
    }
    pub fn double_() -> Type {
        Type::scalar("double")
    }

    pub fn uint(width: u8) -> Type {
        debug_assert!(matches!(width, 8 | 16 | 32 | 64));
        Type::scalar(&format!("uint{width}_t"))
    }

    pub fn int(width: u8) -> Type {
        debug_assert!(matches!(width, 8 | 16 | 32 | 64));
        Type::scalar(&format!("int{width}_t"))
    }

    /// Named struct type, e.g. `Foo` for `typedef struct Foo { ... } Foo;`.
    pub fn struct_(name: impl Into<String>) -> Type {
        Type::scalar(&name.into())
    }

    /// `*self`, incrementing `pointer_level` and setting `is_pointer`.
    pub fn pointer_to(self) -> Type {
        Type {
            is_pointer: true,
            pointer_level: self.pointer_level + 1,
            ..self
        }
    }

    /// `const self` (top-level const, as in `const uint8_t*`).
    pub fn const_(self) -> Type {
        Type {
            is_const: true,
            ..self
        }
    }

    pub fn static_(self) -> Type {
        Type {
            is_static: true,
            ..self
        }
    }

    pub fn extern_(self) -> Type {
        Type {
            is_extern: true,
            ..self
        }
    }

    /// `T[n]`, or `T[]` when `size` is `None` (an incomplete array type,
    /// used for parameter declarations).
    pub fn array_of(element: Type, size: Option<u32>) -> Type {
        Type {
            base_name: element.base_name.clone(),
            is_const: element.is_const,
            is_pointer: false,
            pointer_level: 0,
            is_array: true,
            array_size: size,
            element_type: Some(Box::new(element)),
            is_static: false,
            is_extern: false,
        }
    }

    pub fn is_pointer_like(&self) -> bool {
        self.is_pointer || self.is_array
    }

    /// The element type of a pointer or array: what you get after one
    /// `*x` / `x[i]`. Arrays use the stored `element_type`; pointers
    /// dereference by dropping one `pointer_level` (`uint8_t*` -> `uint8_t`,
    /// `uint32_t**` -> `uint32_t*`). A non-pointer, non-array type is its
    /// own element (used as the safe fallback for `for-of`/destructuring
    /// over a value whose pointer-ness didn't infer cleanly).
    pub fn element(&self) -> Type {
        if self.is_array {
            if let Some(e) = &self.element_type {
                return (**e).clone();
            }
            return Type {
                is_array: false,
                array_size: None,
                element_type: None,
                ..self.clone()
            };
        }
        if self.is_pointer && self.pointer_level > 0 {
            return Type {
                is_pointer: self.pointer_level > 1,
                pointer_level: self.pointer_level - 1,
                ..self.clone()
            };
        }
        self.clone()
    }

    pub fn is_struct_pointer(&self) -> bool {
        self.is_pointer && !is_known_primitive(&self.base_name)
    }

    /// `uint32_t*`, `uint8_t**`, ... useful for `infer_type_from_name`
    /// rules that always build a fixed pointer depth over a primitive.
    pub fn pointer_n(base_name: &str, level: u8) -> Type {
        let mut ty = Type::scalar(base_name);
        for _ in 0..level {
            ty = ty.pointer_to();
        }
        ty
    }
}

pub fn is_known_primitive(base_name: &str) -> bool {
    matches!(
        base_name,
        "uint8_t"
            | "uint16_t"
            | "uint32_t"
            | "uint64_t"
            | "int8_t"
            | "int16_t"
            | "int32_t"
            | "int64_t"
            | "char"
            | "bool"
            | "void"
            | "size_t"
            | "float"
            | "double"
    )
}
