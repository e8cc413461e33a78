use crate::error::MyResult;
use crate::gfx::created;
use tracing::info;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

/// Device, immediate context, swap chain and the views every frame draws into.
pub struct DeviceResources {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    swap_chain: IDXGISwapChain,
    render_target: ID3D11RenderTargetView,
    depth_stencil: ID3D11DepthStencilView,
    depth_state: ID3D11DepthStencilState,
    viewport: D3D11_VIEWPORT,
}

impl DeviceResources {
    pub fn new(hwnd: HWND, size: (u32, u32), use_warp_device: bool) -> MyResult<Self> {
        let (width, height) = size;
        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: DXGI_MODE_DESC {
                Width: width,
                Height: height,
                RefreshRate: DXGI_RATIONAL {
                    Numerator: 0,
                    Denominator: 0,
                },
                Format: DXGI_FORMAT_B8G8R8A8_UNORM,
                ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
                Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
            },
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: 1,
            OutputWindow: hwnd,
            Windowed: TRUE,
            SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
            Flags: 0,
        };

        let driver_type = match use_warp_device {
            true => {
                info!("Using WARP device.");
                D3D_DRIVER_TYPE_WARP
            }
            false => D3D_DRIVER_TYPE_HARDWARE,
        };

        let (device, context, swap_chain) = if cfg!(debug_assertions) {
            match create_device_and_swap_chain(driver_type, D3D11_CREATE_DEVICE_DEBUG, &swap_chain_desc)
            {
                Ok(debug_device) => {
                    info!("D3D11 debug layer enabled");
                    debug_device
                }
                Err(e) => {
                    warn!("D3D11 debug layer unavailable: {e}");
                    create_device_and_swap_chain(
                        driver_type,
                        D3D11_CREATE_DEVICE_FLAG(0),
                        &swap_chain_desc,
                    )?
                }
            }
        } else {
            create_device_and_swap_chain(driver_type, D3D11_CREATE_DEVICE_FLAG(0), &swap_chain_desc)?
        };

        let back_buffer: ID3D11Texture2D = unsafe { swap_chain.GetBuffer(0)? };
        let mut render_target = None;
        unsafe { device.CreateRenderTargetView(&back_buffer, None, Some(&mut render_target))? };
        let render_target = created(render_target, "render target view")?;

        let depth_state_desc = D3D11_DEPTH_STENCIL_DESC {
            DepthEnable: TRUE,
            DepthWriteMask: D3D11_DEPTH_WRITE_MASK_ALL,
            DepthFunc: D3D11_COMPARISON_LESS,
            StencilEnable: FALSE,
            ..Default::default()
        };
        let mut depth_state = None;
        unsafe { device.CreateDepthStencilState(&depth_state_desc, Some(&mut depth_state))? };
        let depth_state = created(depth_state, "depth stencil state")?;

        let depth_desc = D3D11_TEXTURE2D_DESC {
            Width: width,
            Height: height,
            MipLevels: 1,
            ArraySize: 1,
            Format: DXGI_FORMAT_D32_FLOAT,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };
        let mut depth_texture = None;
        unsafe { device.CreateTexture2D(&depth_desc, None, Some(&mut depth_texture))? };
        let depth_texture = created(depth_texture, "depth texture")?;

        let depth_view_desc = D3D11_DEPTH_STENCIL_VIEW_DESC {
            Format: DXGI_FORMAT_D32_FLOAT,
            ViewDimension: D3D11_DSV_DIMENSION_TEXTURE2D,
            Flags: 0,
            Anonymous: D3D11_DEPTH_STENCIL_VIEW_DESC_0 {
                Texture2D: D3D11_TEX2D_DSV { MipSlice: 0 },
            },
        };
        let mut depth_stencil = None;
        unsafe {
            device.CreateDepthStencilView(
                &depth_texture,
                Some(&depth_view_desc),
                Some(&mut depth_stencil),
            )?
        };
        let depth_stencil = created(depth_stencil, "depth stencil view")?;

        let viewport = D3D11_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: width as f32,
            Height: height as f32,
            MinDepth: 0.0,
            MaxDepth: 1.0,
        };

        let resources = Self {
            device,
            context,
            swap_chain,
            render_target,
            depth_stencil,
            depth_state,
            viewport,
        };
        resources.bind_output();
        info!(width, height, "device resources created");
        Ok(resources)
    }

    pub fn device(&self) -> &ID3D11Device {
        &self.device
    }

    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.context
    }

    fn bind_output(&self) {
        unsafe {
            self.context.OMSetDepthStencilState(&self.depth_state, 1);
            self.context.OMSetRenderTargets(
                Some(&[Some(self.render_target.clone())]),
                &self.depth_stencil,
            );
            self.context.RSSetViewports(Some(&[self.viewport]));
        }
    }

    /// Clears colour to `color` and depth to the far plane.
    pub fn clear(&self, color: [f32; 4]) {
        self.bind_output();
        unsafe {
            self.context.ClearRenderTargetView(&self.render_target, &color);
            self.context.ClearDepthStencilView(
                &self.depth_stencil,
                D3D11_CLEAR_DEPTH.0 as u32,
                1.0,
                0,
            );
        }
    }

    pub fn present(&self, vsync: bool) -> MyResult<()> {
        let sync_interval = if vsync { 1 } else { 0 };
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT::default()) }.ok()?;
        Ok(())
    }
}

fn create_device_and_swap_chain(
    driver_type: D3D_DRIVER_TYPE,
    flags: D3D11_CREATE_DEVICE_FLAG,
    swap_chain_desc: &DXGI_SWAP_CHAIN_DESC,
) -> MyResult<(ID3D11Device, ID3D11DeviceContext, IDXGISwapChain)> {
    let mut swap_chain = None;
    let mut device = None;
    let mut context = None;
    unsafe {
        D3D11CreateDeviceAndSwapChain(
            None,
            driver_type,
            None,
            flags,
            None,
            D3D11_SDK_VERSION,
            Some(swap_chain_desc),
            Some(&mut swap_chain),
            Some(&mut device),
            None,
            Some(&mut context),
        )?
    };
    Ok((
        created(device, "device")?,
        created(context, "device context")?,
        created(swap_chain, "swap chain")?,
    ))
}
