use std::{any::type_name, marker::PhantomData, sync::Arc};

use crate::{
    errors::InjectError,
    handle::DiHandle,
    resolver::{dep::Dep, Resolver},
    types::{DependencyInfo, DynError, Injectable, Instance, TypeInfo},
};

/// What a factory produces - a single handle or a tuple of handles
pub trait Outputs: Send + 'static {
    /// Types produced, in order
    fn supplies() -> Vec<TypeInfo>;

    fn into_instances(self) -> Vec<Instance>;
}

impl<T: Injectable> Outputs for Dep<T> {
    fn supplies() -> Vec<TypeInfo> {
        vec![Self::type_info()]
    }

    fn into_instances(self) -> Vec<Instance> {
        vec![Instance::new(self)]
    }
}

impl<T: Injectable> Outputs for Arc<T> {
    fn supplies() -> Vec<TypeInfo> {
        vec![Self::type_info()]
    }

    fn into_instances(self) -> Vec<Instance> {
        vec![Instance::new(self)]
    }
}

macro_rules! impl_outputs_tuple {
    ($($T:ident),+) => {
        impl<$($T: Resolver),+> Outputs for ($($T,)+) {
            fn supplies() -> Vec<TypeInfo> {
                vec![$($T::type_info()),+]
            }

            #[allow(non_snake_case)]
            fn into_instances(self) -> Vec<Instance> {
                let ($($T,)+) = self;
                vec![$(Instance::new($T)),+]
            }
        }
    };
}

impl_outputs_tuple!(A, B);
impl_outputs_tuple!(A, B, C);
impl_outputs_tuple!(A, B, C, D);
impl_outputs_tuple!(A, B, C, D, E);
impl_outputs_tuple!(A, B, C, D, E, F);

/// A Factory providing instances of one or more types
///
/// A factory is invoked at most once per resolution.
pub trait InstanceFactory: Send + 'static {
    type Provides: Outputs;

    /// Returns the typeinfo about the factory's provided types
    fn supplies() -> Vec<TypeInfo> {
        Self::Provides::supplies()
    }

    /// Returns a list of dependencies the factory requires to supply it's types
    fn get_dependencies() -> Vec<DependencyInfo>;

    /// Constructs the factory's provided types
    ///
    /// Every declared dependency can be read from `di`.
    ///
    /// A [`Dep`] argument may be an unbound placeholder when the pool breaks a cycle.
    /// Store it, or look into it with [`Dep::try_read`] - [`Dep::read`] panics on a placeholder
    /// and takes the whole resolution down with it.
    fn construct(&mut self, di: &DiHandle) -> Result<Self::Provides, impl Into<DynError>>;
}

/// Wrapper Trait for factories, providing type-erased instances
pub trait DynFactory: Send {
    /// Name of the factory for diagnostics
    fn name(&self) -> &'static str;

    fn supplies(&self) -> Vec<TypeInfo>;

    /// Returns a list of dependencies for the factory
    fn dependencies(&self) -> Vec<DependencyInfo>;

    /// Constructs the factory's provided instances from its resolved dependencies
    fn construct(&mut self, di: &DiHandle) -> Result<Vec<Instance>, DynError>;
}
// Impl DynFactory for any InstanceFactory
impl<SpecificFactory: InstanceFactory> DynFactory for SpecificFactory {
    fn name(&self) -> &'static str {
        type_name::<SpecificFactory>()
    }

    fn supplies(&self) -> Vec<TypeInfo> {
        SpecificFactory::supplies()
    }

    fn dependencies(&self) -> Vec<DependencyInfo> {
        SpecificFactory::get_dependencies()
    }

    fn construct(&mut self, di: &DiHandle) -> Result<Vec<Instance>, DynError> {
        // Forward the call to the specific implementation
        SpecificFactory::construct(self, di)
            .map(Outputs::into_instances)
            .map_err(|e| e.into())
    }
}

/// Conversion into a factory
///
/// `Marker` only disambiguates the implementations, it is inferred.
pub trait IntoFactory<Marker> {
    type Factory: DynFactory + 'static;

    fn into_factory(self) -> Self::Factory;
}

/// Marker for types implementing [`InstanceFactory`] themselves
pub struct Custom;

impl<F: InstanceFactory> IntoFactory<Custom> for F {
    type Factory = F;

    fn into_factory(self) -> Self::Factory {
        self
    }
}

/// A plain function or closure used as a factory
///
/// Its parameters are its dependencies, its return value what it supplies.
pub struct FnFactory<Func, Args> {
    func: Func,
    _args: PhantomData<fn() -> Args>,
}

macro_rules! impl_fn_factory {
    ($($Arg:ident),*) => {
        impl<Func, Out, $($Arg,)*> InstanceFactory for FnFactory<Func, ($($Arg,)*)>
        where
            Func: FnMut($($Arg),*) -> Out + Send + 'static,
            Out: Outputs,
            $($Arg: Resolver,)*
        {
            type Provides = Out;

            fn get_dependencies() -> Vec<DependencyInfo> {
                vec![$($Arg::dependency_info()),*]
            }

            #[allow(non_snake_case, unused_variables, refining_impl_trait)]
            fn construct(&mut self, di: &DiHandle) -> Result<Out, InjectError> {
                $(let $Arg = di.resolve::<$Arg>()?;)*
                Ok((self.func)($($Arg),*))
            }
        }

        impl<Func, Out, $($Arg,)*> IntoFactory<($($Arg,)*)> for Func
        where
            Func: FnMut($($Arg),*) -> Out + Send + 'static,
            Out: Outputs,
            $($Arg: Resolver,)*
        {
            type Factory = FnFactory<Func, ($($Arg,)*)>;

            fn into_factory(self) -> Self::Factory {
                FnFactory {
                    func: self,
                    _args: PhantomData,
                }
            }
        }
    };
}

impl_fn_factory!();
impl_fn_factory!(A);
impl_fn_factory!(A, B);
impl_fn_factory!(A, B, C);
impl_fn_factory!(A, B, C, D);
impl_fn_factory!(A, B, C, D, E);
impl_fn_factory!(A, B, C, D, E, F);
impl_fn_factory!(A, B, C, D, E, F, G);
impl_fn_factory!(A, B, C, D, E, F, G, H);
