//! An attribute macro to instantiate an `impl` over const generic values.
//!
//! # Usage
//!
//! Add attribute `instantiate` to an `impl` block that is generic over
//! `const` parameters. Each parameter gets a range in `keys(..)`, and the
//! macro emits one concrete `impl` per value, substituting the parameter
//! by a literal. Base cases are written as ordinary `impl`s next to it.
//! For example:
//!
//! ```
//! use fibonacci_memoization::instantiate;
//!
//! struct Fib<const I: usize>;
//!
//! impl Fib<0> {
//!     const VAL: u64 = 0;
//! }
//!
//! impl Fib<1> {
//!     const VAL: u64 = 1;
//! }
//!
//! #[instantiate(keys(I = "2..=38"))]
//! impl<const I: usize> Fib<I> {
//!     const VAL: u64 = Fib::<{ I - 1 }>::VAL + Fib::<{ I - 2 }>::VAL;
//! }
//!
//! assert_eq!(Fib::<38>::VAL, 39088169);
//! ```
//!
//! The compiler evaluates every `VAL` once, so the recurrence is
//! computed at build time and each index is computed at most once.
//!
//! A bound is either an integer `N`, meaning `0..=N`, or a string
//! holding `"a..=b"`, `"a..b"` or `"N"`.
//!
//! Parameters are also replaced inside macro invocations, except where
//! they follow `.` or `::`. A `let`, argument or match binding with the
//! same name as an instantiated parameter is rejected.
//!
//! You can specify multiple keys. The macro expands the cartesian
//! product of their ranges.
//!
//! ```
//! use fibonacci_memoization::instantiate;
//!
//! trait Binomial {
//!     const VAL: u64;
//! }
//!
//! struct Comb<const N: usize, const M: usize>;
//!
//! #[instantiate(keys(N = 6))]
//! impl<const N: usize> Binomial for Comb<N, 0> {
//!     const VAL: u64 = 1;
//! }
//!
//! #[instantiate(keys(M = "1..=6"))]
//! impl<const M: usize> Binomial for Comb<0, M> {
//!     const VAL: u64 = 0;
//! }
//!
//! #[instantiate(keys(N = "1..=6", M = "1..=6"))]
//! impl<const N: usize, const M: usize> Binomial for Comb<N, M> {
//!     const VAL: u64 =
//!         <Comb<{ N - 1 }, { M - 1 }> as Binomial>::VAL + <Comb<{ N - 1 }, M> as Binomial>::VAL;
//! }
//!
//! assert_eq!(<Comb<5, 2> as Binomial>::VAL, 10);
//! ```

extern crate proc_macro;

use darling::FromMeta;
use proc_macro::TokenStream;
use proc_macro2::{Group, Literal, Punct, Spacing, Span, TokenStream as TokenStream2, TokenTree};
use quote::quote;
use std::collections::HashMap;
use syn::visit::{self, Visit};
use syn::visit_mut::{self, VisitMut};
use syn::{
    parse_macro_input, AttributeArgs, Expr, ExprLit, GenericArgument, GenericParam, Ident,
    ItemImpl, Lit, LitInt, Macro, Path, PatIdent, Type, TypePath,
};

/// Upper limit on the number of `impl`s one attribute may emit.
const MAX_INSTANCES: usize = 4096;

/// Inclusive range of values for one const parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    start: usize,
    end: usize,
}

impl Bounds {
    fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// `None` if the range holds more than `usize::MAX` values.
    fn len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        (self.end - self.start).checked_add(1)
    }

    fn values(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

fn parse_usize(s: &str) -> darling::Result<usize> {
    s.trim()
        .parse::<usize>()
        .map_err(|e| darling::Error::custom(format!("invalid bound `{}`: {}", s.trim(), e)))
}

impl FromMeta for Bounds {
    fn from_string(value: &str) -> darling::Result<Self> {
        if let Some((start, end)) = value.split_once("..=") {
            return Ok(Bounds {
                start: parse_usize(start)?,
                end: parse_usize(end)?,
            });
        }
        if let Some((start, end)) = value.split_once("..") {
            let start = parse_usize(start)?;
            let end = parse_usize(end)?;
            if end == 0 {
                return Err(darling::Error::custom(format!(
                    "range `{}` is empty",
                    value
                )));
            }
            return Ok(Bounds {
                start,
                end: end - 1,
            });
        }
        Ok(Bounds {
            start: 0,
            end: parse_usize(value)?,
        })
    }

    fn from_value(value: &Lit) -> darling::Result<Self> {
        match value {
            Lit::Int(n) => n
                .base10_parse::<usize>()
                .map(|end| Bounds { start: 0, end })
                .map_err(|e| darling::Error::custom(e).with_span(value)),
            Lit::Str(s) => Self::from_string(&s.value()).map_err(|e| e.with_span(value)),
            _ => Err(darling::Error::unexpected_lit_type(value)),
        }
    }
}

#[derive(Debug, FromMeta)]
struct InstantiateArgs {
    keys: HashMap<String, Bounds>,
}

#[proc_macro_attribute]
pub fn instantiate(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = parse_macro_input!(attr as AttributeArgs);
    let item_impl = parse_macro_input!(item as ItemImpl);

    let args = match InstantiateArgs::from_list(&attr) {
        Ok(args) => args,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    expand(&args, item_impl)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(args: &InstantiateArgs, item_impl: ItemImpl) -> syn::Result<TokenStream2> {
    let const_params = item_impl
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Const(c) => Some(&c.ident),
            _ => None,
        })
        .collect::<Vec<_>>();

    let mut unknown = args
        .keys
        .keys()
        .filter(|k| !const_params.iter().any(|p| *p == k.as_str()))
        .collect::<Vec<_>>();
    unknown.sort();
    if let Some(k) = unknown.first() {
        return Err(syn::Error::new_spanned(
            &item_impl.generics,
            format!("`{}` is not a const parameter of this impl", k),
        ));
    }

    let mut keys = Vec::with_capacity(const_params.len());
    for param in &const_params {
        let bounds = match args.keys.get(&param.to_string()) {
            Some(b) => *b,
            None => {
                return Err(syn::Error::new_spanned(
                    param,
                    format!("const parameter `{}` has no range in `keys(..)`", param),
                ))
            }
        };
        if bounds.is_empty() {
            return Err(syn::Error::new_spanned(
                param,
                format!("range for `{}` is empty", param),
            ));
        }
        keys.push(((*param).clone(), bounds));
    }

    if keys.is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            "`instantiate` needs an impl with at least one const parameter",
        ));
    }

    let count = keys
        .iter()
        .try_fold(1usize, |acc, (_, b)| acc.checked_mul(b.len()?))
        .filter(|&n| n <= MAX_INSTANCES);
    if count.is_none() {
        return Err(syn::Error::new_spanned(
            &item_impl.generics,
            format!(
                "`instantiate` would emit more than {} impls",
                MAX_INSTANCES
            ),
        ));
    }

    let mut template = item_impl;
    template.generics.params = template
        .generics
        .params
        .into_iter()
        .filter(|p| match p {
            GenericParam::Const(c) => !keys.iter().any(|(k, _)| *k == c.ident),
            _ => true,
        })
        .collect();
    if template.generics.params.is_empty() {
        template.generics.lt_token = None;
        template.generics.gt_token = None;
    }

    let mut shadowing = Shadowing {
        keys: &keys,
        found: None,
    };
    shadowing.visit_item_impl(&template);
    if let Some(ident) = shadowing.found {
        return Err(syn::Error::new_spanned(
            &ident,
            format!("binding `{}` shadows a const parameter being instantiated", ident),
        ));
    }

    let assignments = keys.iter().fold(vec![Vec::new()], |acc, (ident, bounds)| {
        acc.into_iter()
            .flat_map(|prefix: Vec<(Ident, usize)>| {
                bounds.values().map(move |v| {
                    let mut next = prefix.clone();
                    next.push((ident.clone(), v));
                    next
                })
            })
            .collect::<Vec<_>>()
    });

    let instances = assignments
        .into_iter()
        .map(|assignment| {
            let mut instance = template.clone();
            Substitute {
                values: assignment
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }
            .visit_item_impl_mut(&mut instance);
            instance
        })
        .collect::<Vec<_>>();

    Ok(quote! {
        #(#instances)*
    })
}

/// Finds the first pattern binding named like a keyed parameter.
struct Shadowing<'a> {
    keys: &'a [(Ident, Bounds)],
    found: Option<Ident>,
}

impl<'ast> Visit<'ast> for Shadowing<'_> {
    fn visit_pat_ident(&mut self, pat: &'ast PatIdent) {
        if self.found.is_none() && self.keys.iter().any(|(k, _)| *k == pat.ident) {
            self.found = Some(pat.ident.clone());
        }
        visit::visit_pat_ident(self, pat);
    }
}

/// Replaces const parameters by integer literals.
struct Substitute {
    values: HashMap<String, usize>,
}

impl Substitute {
    fn lookup(&self, path: &Path) -> Option<LitInt> {
        let ident = path.get_ident()?;
        let value = self.values.get(&ident.to_string())?;
        Some(LitInt::new(&value.to_string(), ident.span()))
    }

    // Macro bodies are opaque to syn, so rewrite their tokens directly.
    // An ident right after `.` or `::` is a field or path segment.
    fn substitute_tokens(&self, tokens: TokenStream2) -> TokenStream2 {
        let mut out = Vec::new();
        let mut puncts: (Option<Punct>, Option<Punct>) = (None, None);
        for tt in tokens {
            let after_sep = match &puncts {
                (Some(second), Some(first)) if first.spacing() == Spacing::Joint => {
                    second.as_char() == ':' && first.as_char() == ':'
                }
                (Some(second), _) => second.as_char() == '.',
                _ => false,
            };
            let tt = match tt {
                TokenTree::Ident(ident) if !after_sep => match self.values.get(&ident.to_string()) {
                    Some(value) => {
                        let mut lit = Literal::usize_unsuffixed(*value);
                        lit.set_span(ident.span());
                        TokenTree::Literal(lit)
                    }
                    None => TokenTree::Ident(ident),
                },
                TokenTree::Group(group) => {
                    let mut rewritten =
                        Group::new(group.delimiter(), self.substitute_tokens(group.stream()));
                    rewritten.set_span(group.span());
                    TokenTree::Group(rewritten)
                }
                other => other,
            };
            puncts = match &tt {
                TokenTree::Punct(p) => (Some(p.clone()), puncts.0.take()),
                _ => (None, None),
            };
            out.push(tt);
        }
        out.into_iter().collect()
    }
}

impl VisitMut for Substitute {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        if let Expr::Path(p) = expr {
            if p.qself.is_none() {
                if let Some(lit) = self.lookup(&p.path) {
                    *expr = Expr::Lit(ExprLit {
                        attrs: p.attrs.clone(),
                        lit: Lit::Int(lit),
                    });
                    return;
                }
            }
        }
        visit_mut::visit_expr_mut(self, expr);
    }

    // `Fib<I>` parses `I` as a type argument.
    fn visit_generic_argument_mut(&mut self, arg: &mut GenericArgument) {
        if let GenericArgument::Type(Type::Path(TypePath { qself: None, path })) = arg {
            if let Some(lit) = self.lookup(path) {
                *arg = GenericArgument::Const(Expr::Lit(ExprLit {
                    attrs: Vec::new(),
                    lit: Lit::Int(lit),
                }));
                return;
            }
        }
        visit_mut::visit_generic_argument_mut(self, arg);
    }

    fn visit_macro_mut(&mut self, mac: &mut Macro) {
        mac.tokens = self.substitute_tokens(mac.tokens.clone());
        visit_mut::visit_macro_mut(self, mac);
    }
}
